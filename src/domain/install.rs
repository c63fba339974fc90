//! Per-install results and progress events.

use std::path::PathBuf;

use crate::domain::manifest::ComponentManifest;
use crate::domain::project_config::ConstraintCollision;
use crate::domain::source::SourceKind;
use crate::domain::write_plan::{WriteAction, WritePlan};

/// Summary of a completed `add`. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallResult {
    pub component_name: String,
    pub version: String,
    pub files_installed: usize,
    pub dependencies_added: usize,
    pub install_path: PathBuf,
    pub constraint_collisions: Vec<ConstraintCollision>,
    pub plan: WritePlan,
}

/// What a dry run would have done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallPreview {
    pub manifest: ComponentManifest,
    pub install_path: PathBuf,
    pub plan: WritePlan,
    /// Dependencies not yet present in the project.
    pub new_dependencies: Vec<String>,
}

/// Outcome of `add`: a preview in dry-run mode, otherwise the install result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Previewed(InstallPreview),
    Installed(InstallResult),
}

impl AddOutcome {
    pub fn plan(&self) -> &WritePlan {
        match self {
            AddOutcome::Previewed(preview) => &preview.plan,
            AddOutcome::Installed(result) => &result.plan,
        }
    }
}

/// Progress notifications emitted while an install runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallEvent {
    SourceClassified { kind: SourceKind, manifest: String },
    ManifestFetched { name: String, version: String, files: usize },
    FileFetched { name: String, location: String },
    Planned { install_path: PathBuf, files: usize },
    DirectoryCreated { path: PathBuf },
    FileWritten { path: PathBuf, action: WriteAction },
    DependenciesMerged { added: Vec<String> },
    ConfigSaved { component: String },
}
