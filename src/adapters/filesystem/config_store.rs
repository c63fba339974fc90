//! `ConfigStore` implementation for `FilesystemStore`: `.zen/config.yaml`.

use std::fs;

use crate::domain::paths;
use crate::domain::project_config::{parse_config_content, render_config};
use crate::domain::{AppError, ProjectConfig};
use crate::ports::ConfigStore;

use super::FilesystemStore;

impl ConfigStore for FilesystemStore {
    fn exists(&self) -> bool {
        paths::config(&self.root).is_file()
    }

    fn load(&self) -> Result<ProjectConfig, AppError> {
        let config_path = paths::config(&self.root);
        if !config_path.is_file() {
            return Err(AppError::ProjectNotInitialized);
        }

        let content = fs::read_to_string(&config_path).map_err(|e| {
            AppError::config_error(format!("Failed to read {}: {}", config_path.display(), e))
        })?;
        let config = parse_config_content(&content)?;
        tracing::debug!(path = %config_path.display(), components = config.components.len(), "loaded project config");
        Ok(config)
    }

    fn save(&self, config: &ProjectConfig) -> Result<(), AppError> {
        config.validate()?;
        let content = render_config(config)?;

        let zen_dir = paths::zen_dir(&self.root);
        fs::create_dir_all(&zen_dir)?;

        // Write beside the target and rename so readers never see a partial file.
        let config_path = paths::config(&self.root);
        let staging = config_path.with_extension("yaml.tmp");
        fs::write(&staging, content)?;
        if let Err(err) = fs::rename(&staging, &config_path) {
            let _ = fs::remove_file(&staging);
            return Err(err.into());
        }

        tracing::debug!(path = %config_path.display(), "saved project config");
        Ok(())
    }
}
