//! Project configuration (`.zen/config.yaml`).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::categories::CategoryTable;
use crate::domain::AppError;

const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Persisted per-project record of installed components and merged dependencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub name: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Category → directory table written at full init.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub structure: BTreeMap<String, String>,
    #[serde(default)]
    pub components: BTreeMap<String, InstalledComponent>,
    /// Flattened, de-duplicated dependency list across all installs.
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default, skip_serializing_if = "FetchConfig::is_default")]
    pub fetch: FetchConfig,
}

/// Metadata recorded for an installed component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstalledComponent {
    pub name: String,
    pub version: String,
    pub category: String,
    pub source: String,
    #[serde(default)]
    pub dependencies: Vec<String>,
}

/// Manifest fetch settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub timeout_secs: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS, user_agent: None }
    }
}

impl FetchConfig {
    fn is_default(&self) -> bool {
        *self == Self::default()
    }

    pub fn user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("zen/{}", env!("CARGO_PKG_VERSION")))
    }
}

/// Two dependency strings naming the same package with different constraints.
///
/// Both are kept; nothing reconciles them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintCollision {
    pub package: String,
    pub existing: String,
    pub incoming: String,
}

/// Outcome of merging a dependency list into the project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyMerge {
    pub added: Vec<String>,
    pub collisions: Vec<ConstraintCollision>,
}

impl ProjectConfig {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            description: None,
            structure: BTreeMap::new(),
            components: BTreeMap::new(),
            dependencies: Vec::new(),
            fetch: FetchConfig::default(),
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::config_error("Invalid .zen/config.yaml: 'name' must not be empty"));
        }
        for (key, record) in &self.components {
            if *key != record.name {
                return Err(AppError::config_error(format!(
                    "Invalid .zen/config.yaml: component key '{}' does not match record name '{}'",
                    key, record.name
                )));
            }
        }
        if self.fetch.timeout_secs == 0 {
            return Err(AppError::config_error(
                "Invalid .zen/config.yaml: fetch.timeout_secs must be greater than 0",
            ));
        }
        Ok(())
    }

    pub fn category_table(&self) -> CategoryTable {
        CategoryTable::with_overrides(&self.structure)
    }

    pub fn component(&self, name: &str) -> Result<&InstalledComponent, AppError> {
        self.components.get(name).ok_or_else(|| AppError::ComponentNotFound(name.to_string()))
    }

    /// Record a component, replacing any previous record under the same name,
    /// and union its dependencies into the project list.
    pub fn upsert_component(&mut self, record: InstalledComponent) -> DependencyMerge {
        let merge = self.merge_dependencies(&record.dependencies);
        self.components.insert(record.name.clone(), record);
        merge
    }

    /// Drop a component's record. Installed files and dependencies stay.
    pub fn remove_component(&mut self, name: &str) -> Result<InstalledComponent, AppError> {
        self.components.remove(name).ok_or_else(|| AppError::ComponentNotFound(name.to_string()))
    }

    /// Set-union keyed by the raw dependency string, preserving first-seen order.
    pub fn merge_dependencies(&mut self, incoming: &[String]) -> DependencyMerge {
        let mut merge = DependencyMerge::default();

        for dependency in incoming {
            let dependency = dependency.trim();
            if dependency.is_empty() || self.dependencies.iter().any(|d| d == dependency) {
                continue;
            }

            let package = package_name(dependency);
            if let Some(existing) =
                self.dependencies.iter().find(|d| package_name(d).eq_ignore_ascii_case(package))
            {
                merge.collisions.push(ConstraintCollision {
                    package: package.to_string(),
                    existing: existing.clone(),
                    incoming: dependency.to_string(),
                });
            }

            self.dependencies.push(dependency.to_string());
            merge.added.push(dependency.to_string());
        }

        merge
    }
}

/// Package name portion of a requirement string (`requests>=2.0` → `requests`).
pub fn package_name(dependency: &str) -> &str {
    let end = dependency
        .find(|c: char| matches!(c, '<' | '>' | '=' | '!' | '~' | ';' | '[' | '@' | ' '))
        .unwrap_or(dependency.len());
    dependency[..end].trim()
}

/// Parse and validate configuration YAML.
pub fn parse_config_content(content: &str) -> Result<ProjectConfig, AppError> {
    let config: ProjectConfig = serde_yaml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Serialize configuration to YAML.
pub fn render_config(config: &ProjectConfig) -> Result<String, AppError> {
    Ok(serde_yaml::to_string(config)?)
}
