//! API Facade for the application.
//!
//! This module exposes high-level functions that glue together context creation
//! and command execution. Each operation has a `*_at` variant taking an explicit
//! project root; the plain form uses the current directory.

use std::path::PathBuf;

use crate::adapters::{EmbeddedScaffoldStore, FilesystemStore, HttpSourceFetcher};
use crate::app::{AppContext, commands};
use crate::domain::FetchConfig;
use crate::ports::{ConfigStore, ProgressReporter};

pub use crate::app::commands::add::AddOptions;
pub use crate::app::commands::init::{InitMode, InitOptions, InitOutcome};
pub use crate::domain::{
    AddOutcome, AppError, ConstraintCollision, InstallPreview, InstallResult, InstalledComponent,
};

const FALLBACK_PROJECT_NAME: &str = "zen-project";

/// Create an `AppContext` for a given project root.
fn create_context(root: PathBuf) -> AppContext<FilesystemStore, FilesystemStore, EmbeddedScaffoldStore> {
    let store = FilesystemStore::new(root);
    AppContext::new(store.clone(), store, EmbeddedScaffoldStore::new())
}

// =============================================================================
// Init Command API
// =============================================================================

/// Initialize zen in the current directory, or in a new `name` directory beneath it.
pub fn init(name: Option<&str>, minimal: bool, force: bool) -> Result<InitOutcome, AppError> {
    init_at(std::env::current_dir()?, name, minimal, force)
}

/// Initialize zen under `base`.
///
/// With `name`, the project lives in `base/name`, which must not exist unless
/// `force` is set. Without it, `base` itself is initialized and an existing
/// Python project there gets the minimal setup.
pub fn init_at(
    base: impl Into<PathBuf>,
    name: Option<&str>,
    minimal: bool,
    force: bool,
) -> Result<InitOutcome, AppError> {
    let base = base.into();

    let (root, detect_existing) = match name {
        Some(name) => {
            let root = base.join(name);
            if root.exists() && !force {
                return Err(AppError::ProjectExists(PathBuf::from(name)));
            }
            std::fs::create_dir_all(&root)?;
            (root, false)
        }
        None => (base, true),
    };

    let project_name = root
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| FALLBACK_PROJECT_NAME.to_string());

    let ctx = create_context(root);
    commands::init::execute(&ctx, &project_name, &InitOptions { minimal, force, detect_existing })
}

// =============================================================================
// Add Command API
// =============================================================================

/// Install a component into the current directory's project.
pub fn add(options: &AddOptions, reporter: &impl ProgressReporter) -> Result<AddOutcome, AppError> {
    add_at(std::env::current_dir()?, options, reporter)
}

/// Install a component into the project at `root`.
pub fn add_at(
    root: impl Into<PathBuf>,
    options: &AddOptions,
    reporter: &impl ProgressReporter,
) -> Result<AddOutcome, AppError> {
    let ctx = create_context(root.into());

    let fetch_config =
        if ctx.config().exists() { ctx.config().load()?.fetch } else { FetchConfig::default() };
    let fetcher = HttpSourceFetcher::new(&fetch_config)?;

    commands::add::execute(&ctx, &fetcher, reporter, options)
}

// =============================================================================
// Query / Removal API
// =============================================================================

/// Installed components of the current directory's project, in name order.
pub fn list() -> Result<Vec<InstalledComponent>, AppError> {
    list_at(std::env::current_dir()?)
}

pub fn list_at(root: impl Into<PathBuf>) -> Result<Vec<InstalledComponent>, AppError> {
    commands::list::execute(&FilesystemStore::new(root.into()))
}

/// Recorded metadata for one installed component.
pub fn info(name: &str) -> Result<InstalledComponent, AppError> {
    info_at(std::env::current_dir()?, name)
}

pub fn info_at(root: impl Into<PathBuf>, name: &str) -> Result<InstalledComponent, AppError> {
    commands::info::execute(&FilesystemStore::new(root.into()), name)
}

/// Drop a component's record. Files and dependencies are left in place.
pub fn remove(name: &str) -> Result<InstalledComponent, AppError> {
    remove_at(std::env::current_dir()?, name)
}

pub fn remove_at(root: impl Into<PathBuf>, name: &str) -> Result<InstalledComponent, AppError> {
    commands::remove::execute(&FilesystemStore::new(root.into()), name)
}
