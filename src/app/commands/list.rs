use crate::domain::{AppError, InstalledComponent};
use crate::ports::ConfigStore;

/// Installed components in name order.
pub fn execute(config: &impl ConfigStore) -> Result<Vec<InstalledComponent>, AppError> {
    Ok(config.load()?.components.into_values().collect())
}
