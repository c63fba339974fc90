use crate::domain::{AppError, DependencyMerge, InstalledComponent, ProjectConfig};

/// Port for the persisted project configuration.
///
/// `save` rewrites the whole document. Mutations go through a fresh `load`
/// immediately before `save` within the same operation; there is no locking,
/// so concurrent processes race with last-write-wins.
pub trait ConfigStore {
    /// Whether a configuration document exists.
    fn exists(&self) -> bool;

    /// Load the configuration. Fails with `ProjectNotInitialized` if absent.
    fn load(&self) -> Result<ProjectConfig, AppError>;

    /// Persist the full configuration, replacing what is stored.
    fn save(&self, config: &ProjectConfig) -> Result<(), AppError>;

    /// Load, record `record` (replacing any prior entry), merge its dependencies, save.
    fn upsert_component(&self, record: InstalledComponent) -> Result<DependencyMerge, AppError> {
        let mut config = self.load()?;
        let merge = config.upsert_component(record);
        self.save(&config)?;
        Ok(merge)
    }

    /// Load, drop the entry for `name`, save. Fails with `ComponentNotFound` if absent.
    fn remove_component(&self, name: &str) -> Result<InstalledComponent, AppError> {
        let mut config = self.load()?;
        let removed = config.remove_component(name)?;
        self.save(&config)?;
        Ok(removed)
    }
}
