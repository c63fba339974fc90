//! Destination resolution for manifest files.
//!
//! Pure: the same manifest, override, table and root always resolve to the same
//! destinations, so a dry run and a real run agree.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::domain::categories::CategoryTable;
use crate::domain::manifest::{ComponentManifest, FieldViolation, ManifestError};
use crate::domain::paths::relative_within;
use crate::domain::AppError;

/// Destination computed for one manifest file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFile {
    /// Position of the entry in `manifest.files`.
    pub index: usize,
    /// Destination relative to the project root.
    pub relative: PathBuf,
    /// Destination joined onto the project root.
    pub absolute: PathBuf,
}

/// All destinations for one install, plus the directory they were placed under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallLayout {
    pub install_path: PathBuf,
    pub files: Vec<ResolvedFile>,
}

/// Compute where every manifest file lands.
///
/// With `override_path`, files are placed flat under it using their declared
/// `name`. Otherwise the category directory is prefixed to each declared
/// `path`, unless the path already starts with that directory.
pub fn resolve(
    manifest: &ComponentManifest,
    override_path: Option<&Path>,
    table: &CategoryTable,
    root: &Path,
) -> Result<InstallLayout, AppError> {
    let install_path = match override_path {
        Some(dir) => relative_within(root, dir)?,
        None => relative_within(root, Path::new(table.directory_for(&manifest.category)))?,
    };

    let mut files = Vec::with_capacity(manifest.files.len());
    let mut seen: BTreeMap<PathBuf, usize> = BTreeMap::new();
    let mut duplicates = Vec::new();

    for (index, entry) in manifest.files.iter().enumerate() {
        let (declared, field) = match override_path {
            Some(_) => (install_path.join(&entry.name), "name"),
            None => {
                let declared = Path::new(&entry.path);
                if declared.is_absolute() {
                    return Err(AppError::PathTraversal(entry.path.clone()));
                }
                let declared = relative_within(root, declared)?;
                if declared.starts_with(&install_path) {
                    (declared, "path")
                } else {
                    (install_path.join(declared), "path")
                }
            }
        };

        let relative = relative_within(root, &declared)?;
        if relative.as_os_str().is_empty() || relative == install_path {
            return Err(AppError::PathTraversal(declared.display().to_string()));
        }

        if let Some(first) = seen.get(&relative) {
            duplicates.push(FieldViolation {
                field: format!("files[{}].{}", index, field),
                reason: format!(
                    "resolves to {}, the same destination as files[{}]",
                    relative.display(),
                    first
                ),
            });
            continue;
        }
        seen.insert(relative.clone(), index);

        files.push(ResolvedFile { index, absolute: root.join(&relative), relative });
    }

    if !duplicates.is_empty() {
        return Err(ManifestError::Invalid(duplicates).into());
    }

    Ok(InstallLayout { install_path, files })
}
