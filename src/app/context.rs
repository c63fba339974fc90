use crate::ports::{ConfigStore, ProjectFilesystem, ScaffoldStore};

/// Application context holding the project-scoped stores a command works against.
pub struct AppContext<P: ProjectFilesystem, C: ConfigStore, T: ScaffoldStore> {
    project: P,
    config: C,
    scaffold: T,
}

impl<P: ProjectFilesystem, C: ConfigStore, T: ScaffoldStore> AppContext<P, C, T> {
    /// Create a new application context.
    pub fn new(project: P, config: C, scaffold: T) -> Self {
        Self { project, config, scaffold }
    }

    /// Get a reference to the project filesystem.
    pub fn project(&self) -> &P {
        &self.project
    }

    /// Get a reference to the configuration store.
    pub fn config(&self) -> &C {
        &self.config
    }

    /// Get a reference to the scaffold store.
    pub fn scaffold(&self) -> &T {
        &self.scaffold
    }
}
