//! Init command: create `.zen/config.yaml` and, in full mode, the project scaffold.

use std::path::{Path, PathBuf};

use crate::app::AppContext;
use crate::domain::paths::{CONFIG_FILE, ZEN_DIR};
use crate::domain::{AppError, CategoryTable, ProjectConfig};
use crate::ports::{ConfigStore, ProjectFilesystem, ScaffoldStore};

const PROJECT_VERSION: &str = "1.0.0";
const GITIGNORE_FILE: &str = ".gitignore";
const CACHE_IGNORE_ENTRY: &str = ".zen/cache/";

/// Files and directories that mark a directory as an existing Python project.
const EXISTING_PROJECT_MARKERS: &[&str] = &[
    "setup.py",
    "pyproject.toml",
    "requirements.txt",
    "Pipfile",
    "poetry.lock",
    "src",
    "app.py",
    "main.py",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitMode {
    /// Configuration plus directories, package markers and starter files.
    Full,
    /// Configuration only.
    Minimal,
}

impl InitMode {
    pub fn label(&self) -> &'static str {
        match self {
            InitMode::Full => "full",
            InitMode::Minimal => "minimal",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    pub minimal: bool,
    pub force: bool,
    /// Switch to minimal mode when the directory already holds a Python project.
    pub detect_existing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitOutcome {
    pub project_name: String,
    pub mode: InitMode,
    /// Files written, relative to the project root.
    pub written: Vec<PathBuf>,
    /// Scaffold files left untouched because they already existed.
    pub skipped: Vec<PathBuf>,
}

pub fn execute<P, C, T>(
    ctx: &AppContext<P, C, T>,
    project_name: &str,
    options: &InitOptions,
) -> Result<InitOutcome, AppError>
where
    P: ProjectFilesystem,
    C: ConfigStore,
    T: ScaffoldStore,
{
    if ctx.config().exists() && !options.force {
        return Err(AppError::ProjectExists(Path::new(ZEN_DIR).join(CONFIG_FILE)));
    }

    let mode = if options.minimal || (options.detect_existing && looks_like_project(ctx.project())) {
        InitMode::Minimal
    } else {
        InitMode::Full
    };
    tracing::debug!(project = project_name, mode = mode.label(), "initializing project");

    match mode {
        InitMode::Minimal => initialize_minimal(ctx, project_name),
        InitMode::Full => initialize_full(ctx, project_name, options.force),
    }
}

/// Write a bare configuration and make sure the cache directory is ignored.
pub fn initialize_minimal<P, C, T>(
    ctx: &AppContext<P, C, T>,
    project_name: &str,
) -> Result<InitOutcome, AppError>
where
    P: ProjectFilesystem,
    C: ConfigStore,
    T: ScaffoldStore,
{
    ctx.config().save(&ProjectConfig::new(project_name, PROJECT_VERSION))?;

    let mut written = vec![Path::new(ZEN_DIR).join(CONFIG_FILE)];
    if ensure_cache_ignored(ctx.project())? {
        written.push(PathBuf::from(GITIGNORE_FILE));
    }

    Ok(InitOutcome {
        project_name: project_name.to_string(),
        mode: InitMode::Minimal,
        written,
        skipped: Vec::new(),
    })
}

fn initialize_full<P, C, T>(
    ctx: &AppContext<P, C, T>,
    project_name: &str,
    force: bool,
) -> Result<InitOutcome, AppError>
where
    P: ProjectFilesystem,
    C: ConfigStore,
    T: ScaffoldStore,
{
    let mut config = ProjectConfig::new(project_name, PROJECT_VERSION);
    config.description = Some(format!("zen project: {}", project_name));
    config.structure = CategoryTable::builtin().entries().clone();

    let mut written = Vec::new();
    let mut skipped = Vec::new();

    for file in ctx.scaffold().project_files(project_name)? {
        let path = PathBuf::from(&file.path);
        if ctx.project().exists(&path) && !force {
            tracing::debug!(path = %path.display(), "keeping existing scaffold file");
            skipped.push(path);
            continue;
        }
        ctx.project().write_file(&path, &file.content)?;
        written.push(path);
    }

    ctx.config().save(&config)?;
    written.push(Path::new(ZEN_DIR).join(CONFIG_FILE));

    if ensure_cache_ignored(ctx.project())? && !written.iter().any(|p| p == Path::new(GITIGNORE_FILE)) {
        written.push(PathBuf::from(GITIGNORE_FILE));
    }

    Ok(InitOutcome { project_name: project_name.to_string(), mode: InitMode::Full, written, skipped })
}

fn looks_like_project(project: &impl ProjectFilesystem) -> bool {
    EXISTING_PROJECT_MARKERS.iter().any(|marker| project.exists(Path::new(marker)))
}

/// Append the cache entry to `.gitignore`, creating the file if needed.
///
/// Returns whether the file was modified.
fn ensure_cache_ignored(project: &impl ProjectFilesystem) -> Result<bool, AppError> {
    let path = Path::new(GITIGNORE_FILE);
    let existing = if project.exists(path) { project.read_file(path)? } else { String::new() };

    if existing.lines().any(|line| line.trim() == CACHE_IGNORE_ENTRY) {
        return Ok(false);
    }

    let mut content = existing;
    if !content.is_empty() && !content.ends_with('\n') {
        content.push('\n');
    }
    if !content.is_empty() {
        content.push('\n');
    }
    content.push_str("# zen\n");
    content.push_str(CACHE_IGNORE_ENTRY);
    content.push('\n');

    project.write_file(path, &content)?;
    Ok(true)
}
