use crate::domain::InstallEvent;

/// Port the install pipeline reports progress through.
pub trait ProgressReporter {
    fn report(&self, event: &InstallEvent);
}

/// Reporter that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn report(&self, _event: &InstallEvent) {}
}
