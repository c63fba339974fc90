use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::manifest::ManifestError;

/// Library-wide error type for zen operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// The requested component location matches none of the supported source forms.
    #[error("Unrecognized component source '{input}': {reason}")]
    InvalidSource { input: String, reason: String },

    /// Retrieving a manifest or file body failed.
    #[error("Failed to fetch {location}: {reason}{}", status_suffix(.status))]
    Fetch { location: String, reason: String, status: Option<u16> },

    /// The manifest is malformed or incomplete.
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Destination files already exist and overwriting was not requested.
    #[error(
        "Refusing to overwrite existing file(s): {}. Use --overwrite to replace them.",
        join_paths(.existing_paths)
    )]
    Conflict { existing_paths: Vec<PathBuf> },

    /// No `.zen/config.yaml` found in the project root.
    #[error("Not in a zen project (not initialized).")]
    ProjectNotInitialized,

    /// Configuration is present but unusable.
    #[error("{0}")]
    Configuration(String),

    /// YAML decoding of the project configuration failed.
    #[error("Invalid .zen/config.yaml: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    /// Component is not recorded in the project configuration.
    #[error("Component '{0}' not found. Run 'zen list' to see installed components.")]
    ComponentNotFound(String),

    /// A destination resolves outside the project root.
    #[error("Path escapes the project root: {0}")]
    PathTraversal(String),

    /// Init target is already a zen project (or an existing directory).
    #[error("'{}' already exists. Use --force to overwrite.", .0.display())]
    ProjectExists(PathBuf),

    /// Embedded scaffold template failed to render.
    #[error("Failed to render template '{template}': {reason}")]
    Template { template: String, reason: String },
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    pub fn fetch_error(
        location: impl Into<String>,
        reason: impl Into<String>,
        status: Option<u16>,
    ) -> Self {
        AppError::Fetch { location: location.into(), reason: reason.into(), status }
    }

    /// Whether the error belongs to the configuration family (missing or unreadable config).
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            AppError::ProjectNotInitialized | AppError::Configuration(_) | AppError::ConfigParse(_)
        )
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|code| format!(" (HTTP {})", code)).unwrap_or_default()
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", ")
}
