//! Conflict and overwrite policy.
//!
//! The whole plan is computed before anything touches disk. Either every
//! destination may be written, or the install aborts with every conflicting
//! path listed.

use std::path::{Path, PathBuf};

use crate::domain::AppError;

/// What currently occupies a project-relative path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathState {
    Missing,
    File,
    Directory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteAction {
    Create,
    Overwrite,
}

impl WriteAction {
    pub fn label(&self) -> &'static str {
        match self {
            WriteAction::Create => "create",
            WriteAction::Overwrite => "overwrite",
        }
    }
}

/// One file write, relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteStep {
    pub path: PathBuf,
    pub content: String,
    pub action: WriteAction,
}

/// Validated set of filesystem changes for one install.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WritePlan {
    /// Missing directories, parents before children.
    pub directories: Vec<PathBuf>,
    pub steps: Vec<WriteStep>,
}

impl WritePlan {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.steps.iter().map(|step| step.path.as_path())
    }

    pub fn overwrites(&self) -> usize {
        self.steps.iter().filter(|step| step.action == WriteAction::Overwrite).count()
    }
}

/// Decide, for every destination, whether it is created or overwritten.
///
/// Existing files abort the plan unless `overwrite` is set. Existing
/// directories, and files sitting where a parent directory is needed, always
/// conflict.
pub fn plan<P>(
    destinations: Vec<(PathBuf, String)>,
    overwrite: bool,
    probe: P,
) -> Result<WritePlan, AppError>
where
    P: Fn(&Path) -> PathState,
{
    let mut plan = WritePlan::default();
    let mut conflicts = Vec::new();

    for (path, content) in destinations {
        let mut parents: Vec<&Path> = path
            .ancestors()
            .skip(1)
            .filter(|ancestor| !ancestor.as_os_str().is_empty())
            .collect();
        parents.reverse();

        for parent in parents {
            match probe(parent) {
                PathState::Directory => {}
                PathState::File => {
                    if !conflicts.iter().any(|c: &PathBuf| c == parent) {
                        conflicts.push(parent.to_path_buf());
                    }
                }
                PathState::Missing => {
                    if !plan.directories.iter().any(|d| d == parent) {
                        plan.directories.push(parent.to_path_buf());
                    }
                }
            }
        }

        let action = match probe(&path) {
            PathState::Missing => WriteAction::Create,
            PathState::File if overwrite => WriteAction::Overwrite,
            PathState::File | PathState::Directory => {
                conflicts.push(path.clone());
                continue;
            }
        };

        plan.steps.push(WriteStep { path, content, action });
    }

    if !conflicts.is_empty() {
        return Err(AppError::Conflict { existing_paths: conflicts });
    }

    Ok(plan)
}
