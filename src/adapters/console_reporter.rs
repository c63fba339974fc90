use crate::domain::InstallEvent;
use crate::ports::ProgressReporter;

/// Reporter printing install progress to stderr, keeping stdout for summaries.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleReporter {
    verbose: bool,
}

impl ConsoleReporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

/// One-line rendering of an event, or `None` for events shown only when verbose.
fn describe(event: &InstallEvent, verbose: bool) -> Option<String> {
    match event {
        InstallEvent::SourceClassified { kind, manifest } => {
            Some(format!("Fetching {} manifest from {}", kind.label(), manifest))
        }
        InstallEvent::ManifestFetched { name, version, files } => {
            Some(format!("Resolved {}@{} ({} file(s))", name, version, files))
        }
        InstallEvent::FileFetched { name, location } if verbose => {
            Some(format!("  fetched {} from {}", name, location))
        }
        InstallEvent::Planned { install_path, files } => {
            Some(format!("Installing {} file(s) into {}", files, install_path.display()))
        }
        InstallEvent::DirectoryCreated { path } if verbose => {
            Some(format!("  mkdir {}", path.display()))
        }
        InstallEvent::FileWritten { path, action } => {
            Some(format!("  {} {}", action.label(), path.display()))
        }
        InstallEvent::DependenciesMerged { added } if !added.is_empty() => {
            Some(format!("Added dependencies: {}", added.join(", ")))
        }
        InstallEvent::ConfigSaved { component } if verbose => {
            Some(format!("Recorded {} in .zen/config.yaml", component))
        }
        _ => None,
    }
}

impl ProgressReporter for ConsoleReporter {
    fn report(&self, event: &InstallEvent) {
        tracing::debug!(?event, "install progress");
        if let Some(line) = describe(event, self.verbose) {
            eprintln!("{}", line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SourceKind, WriteAction};
    use std::path::PathBuf;

    #[test]
    fn quiet_mode_hides_detail_events() {
        let event = InstallEvent::FileFetched {
            name: "validator.py".into(),
            location: "https://example.com/validator.py".into(),
        };
        assert_eq!(describe(&event, false), None);
        assert!(describe(&event, true).unwrap().contains("validator.py"));
    }

    #[test]
    fn milestones_are_always_described() {
        let classified = InstallEvent::SourceClassified {
            kind: SourceKind::Tree,
            manifest: "https://raw.githubusercontent.com/u/r/main/c/component.json".into(),
        };
        assert!(describe(&classified, false).unwrap().contains("raw.githubusercontent.com"));

        let written =
            InstallEvent::FileWritten { path: PathBuf::from("src/utils/a.py"), action: WriteAction::Overwrite };
        assert_eq!(describe(&written, false).unwrap(), "  overwrite src/utils/a.py");
    }

    #[test]
    fn empty_dependency_merge_is_silent() {
        assert_eq!(describe(&InstallEvent::DependenciesMerged { added: vec![] }, true), None);
    }
}
