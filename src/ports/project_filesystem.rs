//! Project-level filesystem operations.
//!
//! This port provides file I/O scoped to the project root. It does not own
//! `.zen/` semantics; those belong to the config store port.

use std::path::{Path, PathBuf};

use crate::domain::{AppError, PathState};

/// Port for low-level project filesystem operations.
///
/// All `path` arguments are relative to the project root.
/// Implementations must reject paths that escape the root boundary.
pub trait ProjectFilesystem {
    /// The project root every relative path is resolved against.
    fn root(&self) -> &Path;

    /// Read a file as UTF-8 text.
    fn read_file(&self, path: &Path) -> Result<String, AppError>;

    /// Write UTF-8 content to a file, replacing any existing content.
    fn write_file(&self, path: &Path, content: &str) -> Result<(), AppError>;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> Result<(), AppError>;

    /// What currently occupies `path`.
    fn path_state(&self, path: &Path) -> PathState;

    /// Check whether a file or directory exists.
    fn exists(&self, path: &Path) -> bool {
        self.path_state(path) != PathState::Missing
    }

    /// Resolve a relative path to an absolute path within the project root.
    fn resolve_path(&self, path: &Path) -> PathBuf {
        self.root().join(path)
    }
}
