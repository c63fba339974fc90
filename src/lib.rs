//! zen: install source components from JSON manifests into a project.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api::{
    AddOptions, AddOutcome, InitMode, InitOutcome, InstallPreview, InstallResult,
    InstalledComponent, add, add_at, info, info_at, init, init_at, list, list_at, remove,
    remove_at,
};
pub use domain::AppError;
