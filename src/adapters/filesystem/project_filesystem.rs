//! `ProjectFilesystem` implementation for `FilesystemStore`.

use std::fs;
use std::path::Path;

use crate::domain::{AppError, PathState};
use crate::ports::ProjectFilesystem;

use super::FilesystemStore;

impl ProjectFilesystem for FilesystemStore {
    fn root(&self) -> &Path {
        &self.root
    }

    fn read_file(&self, path: &Path) -> Result<String, AppError> {
        let full_path = self.resolve_path(path);
        self.validate_path_within_root(&full_path)?;
        fs::read_to_string(full_path).map_err(AppError::from)
    }

    fn write_file(&self, path: &Path, content: &str) -> Result<(), AppError> {
        let full_path = self.resolve_path(path);
        self.validate_path_within_root(&full_path)?;
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).map_err(AppError::from)?;
        }
        fs::write(full_path, content).map_err(AppError::from)
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), AppError> {
        let full_path = self.resolve_path(path);
        self.validate_path_within_root(&full_path)?;
        fs::create_dir_all(full_path).map_err(AppError::from)
    }

    fn path_state(&self, path: &Path) -> PathState {
        let full_path = self.resolve_path(path);
        if self.validate_path_within_root(&full_path).is_err() {
            return PathState::Missing;
        }
        match fs::metadata(&full_path) {
            Ok(metadata) if metadata.is_dir() => PathState::Directory,
            Ok(_) => PathState::File,
            Err(_) => PathState::Missing,
        }
    }
}
