//! Remove command: forget a component.
//!
//! Only the configuration record goes away. Installed files and merged
//! dependencies stay where they are.

use crate::domain::{AppError, InstalledComponent};
use crate::ports::ConfigStore;

pub fn execute(config: &impl ConfigStore, name: &str) -> Result<InstalledComponent, AppError> {
    let removed = config.remove_component(name)?;
    tracing::debug!(component = name, "removed component record");
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::commands::add::{self, AddOptions};
    use crate::ports::NoopReporter;
    use crate::testing::{FakeFetcher, TestProject};

    const URL: &str = "https://example.com/email-validator.json";

    #[test]
    fn removes_record_but_keeps_files_and_dependencies() {
        let project = TestProject::initialized();
        let fetcher = FakeFetcher::new().with_body(
            URL,
            r#"{"name":"email-validator","version":"1.0.0","category":"utils",
                "dependencies":["validators"],
                "files":[{"name":"validator.py","path":"validator.py","content":"x"}]}"#,
        );
        add::execute(
            &project.ctx,
            &fetcher,
            &NoopReporter,
            &AddOptions { source: URL.into(), ..Default::default() },
        )
        .unwrap();

        let removed = execute(project.ctx.config(), "email-validator").unwrap();

        assert_eq!(removed.name, "email-validator");
        let config = project.config();
        assert!(config.components.is_empty());
        assert_eq!(config.dependencies, vec!["validators"]);
        assert_eq!(project.read("src/utils/validator.py"), "x");
    }

    #[test]
    fn removing_absent_component_is_not_found() {
        let project = TestProject::initialized();
        let before = project.config();

        let result = execute(project.ctx.config(), "ghost");

        assert!(matches!(result, Err(AppError::ComponentNotFound(_))));
        assert_eq!(project.config(), before);
    }
}
