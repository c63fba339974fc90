//! Filesystem adapter implementations for store ports.
//!
//! Provides concrete adapters for `ProjectFilesystem` and `ConfigStore`. Both
//! are implemented on a single `FilesystemStore` struct that owns the project
//! root path and enforces path-traversal safety.

mod config_store;
mod project_filesystem;

use std::path::{Path, PathBuf};

use crate::domain::AppError;
use crate::domain::paths::normalize_path;

/// Filesystem-backed store rooted at a project directory.
#[derive(Debug, Clone)]
pub struct FilesystemStore {
    root: PathBuf,
}

impl FilesystemStore {
    /// Create a store rooted at the given directory.
    ///
    /// A relative root is anchored to the current directory so that path checks
    /// compare like with like.
    pub fn new(root: PathBuf) -> Self {
        let root = std::path::absolute(&root).map(|abs| normalize_path(&abs)).unwrap_or(root);
        Self { root }
    }
}

// ── Path safety ────────────────────────────────────────────────────────

impl FilesystemStore {
    /// Validates that a path (after logical normalization) is within the root.
    pub(crate) fn validate_path_within_root(&self, path: &Path) -> Result<(), AppError> {
        let full_path = if path.is_absolute() { path.to_path_buf() } else { self.root.join(path) };

        let normalized_path = normalize_path(&full_path);
        let normalized_root = normalize_path(&self.root);

        if !normalized_root.is_absolute() || !normalized_path.starts_with(&normalized_root) {
            return Err(AppError::PathTraversal(path.display().to_string()));
        }

        Ok(())
    }
}
