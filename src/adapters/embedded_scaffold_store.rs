use std::collections::BTreeSet;

use include_dir::{Dir, include_dir};
use minijinja::{Environment, context};

use crate::domain::{AppError, CategoryTable};
use crate::ports::{ScaffoldFile, ScaffoldStore};

static SCAFFOLD_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/assets/scaffold");

const TEMPLATE_SUFFIX: &str = ".j2";
const PACKAGE_MARKER: &str = "__init__.py";

/// Scaffold store backed by assets compiled into the binary.
#[derive(Debug, Clone, Default)]
pub struct EmbeddedScaffoldStore {
    categories: CategoryTable,
}

impl EmbeddedScaffoldStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn render(&self, template_name: &str, source: &str, project_name: &str) -> Result<String, AppError> {
        let template_error = |e: minijinja::Error| AppError::Template {
            template: template_name.to_string(),
            reason: e.to_string(),
        };

        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        env.add_template(template_name, source).map_err(template_error)?;

        let template = env.get_template(template_name).map_err(template_error)?;
        template
            .render(context! {
                project_name => project_name,
                structure => self.categories.entries(),
            })
            .map_err(template_error)
    }

    /// `src/__init__.py` plus one marker per category directory.
    fn package_markers(&self) -> Vec<ScaffoldFile> {
        let mut directories: BTreeSet<&str> = BTreeSet::new();
        directories.insert("src");
        directories.extend(self.categories.entries().values().map(String::as_str));

        directories
            .into_iter()
            .map(|dir| ScaffoldFile { path: format!("{}/{}", dir, PACKAGE_MARKER), content: String::new() })
            .collect()
    }
}

/// Project-relative destination for an embedded asset.
///
/// Dotfiles are stored without their leading dot so packaging tools keep them.
fn destination(asset_path: &str) -> String {
    let path = asset_path.strip_suffix(TEMPLATE_SUFFIX).unwrap_or(asset_path);
    match path {
        "gitignore" => ".gitignore".to_string(),
        other => other.to_string(),
    }
}

impl ScaffoldStore for EmbeddedScaffoldStore {
    fn project_files(&self, project_name: &str) -> Result<Vec<ScaffoldFile>, AppError> {
        let mut files = Vec::new();

        for file in SCAFFOLD_DIR.files() {
            let asset_path = file.path().to_string_lossy().to_string();
            let source = file.contents_utf8().ok_or_else(|| AppError::Template {
                template: asset_path.clone(),
                reason: "asset is not valid UTF-8".to_string(),
            })?;

            let content = if asset_path.ends_with(TEMPLATE_SUFFIX) {
                self.render(&asset_path, source, project_name)?
            } else {
                source.to_string()
            };

            files.push(ScaffoldFile { path: destination(&asset_path), content });
        }

        files.extend(self.package_markers());
        files.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(files)
    }
}
