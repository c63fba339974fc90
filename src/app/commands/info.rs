use crate::domain::{AppError, InstalledComponent};
use crate::ports::ConfigStore;

pub fn execute(config: &impl ConfigStore, name: &str) -> Result<InstalledComponent, AppError> {
    config.load()?.component(name).cloned()
}
