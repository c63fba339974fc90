use std::sync::Mutex;

use crate::domain::InstallEvent;
use crate::ports::ProgressReporter;

/// Reporter that keeps every event for later assertions.
#[derive(Default)]
pub struct RecordingReporter {
    pub events: Mutex<Vec<InstallEvent>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<InstallEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl ProgressReporter for RecordingReporter {
    fn report(&self, event: &InstallEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}
