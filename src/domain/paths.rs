use std::path::{Component, Path, PathBuf};

use crate::domain::AppError;

/// The `.zen/` project directory name.
pub const ZEN_DIR: &str = ".zen";

/// Project configuration filename inside `.zen/`.
pub const CONFIG_FILE: &str = "config.yaml";

/// Dependency list kept at the project root.
pub const REQUIREMENTS_FILE: &str = "requirements.txt";

/// `.zen/`
pub fn zen_dir(root: &Path) -> PathBuf {
    root.join(ZEN_DIR)
}

/// `.zen/config.yaml`
pub fn config(root: &Path) -> PathBuf {
    zen_dir(root).join(CONFIG_FILE)
}

/// `requirements.txt`
pub fn requirements(root: &Path) -> PathBuf {
    root.join(REQUIREMENTS_FILE)
}

/// Normalize a path by resolving `.` and `..` components logically.
/// This does not access the filesystem.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut components = path.components().peekable();
    let mut ret = if let Some(Component::RootDir) = components.peek() {
        components.next();
        PathBuf::from("/")
    } else {
        PathBuf::new()
    };

    for component in components {
        match component {
            Component::Prefix(..) | Component::RootDir => {
                ret.push(component.as_os_str());
            }
            Component::CurDir => {}
            Component::ParentDir => {
                ret.pop();
            }
            Component::Normal(c) => {
                ret.push(c);
            }
        }
    }
    ret
}

/// Express `path` relative to the project root, rejecting anything that escapes it.
///
/// Relative inputs are taken as relative to `root`. A leading `..` that would
/// climb above the root is an error even though `normalize_path` alone would
/// silently clamp it. An absolute input is only accepted against an absolute
/// root, since a relative root says nothing about where it sits on disk.
pub fn relative_within(root: &Path, path: &Path) -> Result<PathBuf, AppError> {
    let relative = if path.is_absolute() {
        if !root.is_absolute() {
            return Err(AppError::PathTraversal(path.display().to_string()));
        }
        let normalized = normalize_path(path);
        let normalized_root = normalize_path(root);
        normalized
            .strip_prefix(&normalized_root)
            .map(Path::to_path_buf)
            .map_err(|_| AppError::PathTraversal(path.display().to_string()))?
    } else {
        let mut depth: usize = 0;
        for component in path.components() {
            match component {
                Component::Normal(_) => depth += 1,
                Component::CurDir => {}
                Component::ParentDir => {
                    depth = depth
                        .checked_sub(1)
                        .ok_or_else(|| AppError::PathTraversal(path.display().to_string()))?;
                }
                Component::RootDir | Component::Prefix(_) => {
                    return Err(AppError::PathTraversal(path.display().to_string()));
                }
            }
        }
        normalize_path(path)
    };

    if relative.as_os_str().is_empty() {
        return Ok(PathBuf::new());
    }
    Ok(relative)
}
