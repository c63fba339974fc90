use crate::domain::AppError;

/// A file produced by project initialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldFile {
    /// Path relative to the project root.
    pub path: String,
    /// File content as UTF-8 text.
    pub content: String,
}

/// Port for the files `zen init` lays down.
pub trait ScaffoldStore {
    /// Render the full project scaffold for `project_name`.
    fn project_files(&self, project_name: &str) -> Result<Vec<ScaffoldFile>, AppError>;
}
