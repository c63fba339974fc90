//! Component manifest decoding and validation.
//!
//! The wire format is decoded into a permissive [`RawManifest`] first so that
//! every problem can be reported by field; only a fully validated
//! [`ComponentManifest`] leaves this module.

use std::fmt;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Category assigned when the manifest does not declare one.
pub const DEFAULT_CATEGORY: &str = "uncategorized";

/// Component type assigned when the manifest does not declare one.
pub const DEFAULT_KIND: &str = "component";

/// A validated component manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentManifest {
    pub name: String,
    pub version: String,
    pub description: String,
    pub category: String,
    /// Declared component type, `component` unless stated.
    pub kind: String,
    pub dependencies: Vec<String>,
    /// Development-only packages. Reported, never written to `requirements.txt`.
    pub dev_dependencies: Vec<String>,
    /// Other registry components this one builds on. Reported, not installed.
    pub registry_dependencies: Vec<String>,
    pub files: Vec<FileEntry>,
    pub author: Option<String>,
    pub license: Option<String>,
    pub homepage: Option<String>,
    pub python_requires: Option<String>,
    pub keywords: Vec<String>,
}

/// One file declared by a manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub name: String,
    pub path: String,
    pub source: FileSource,
}

/// Where a file's body comes from. Inline bodies are never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSource {
    Inline(String),
    /// Reference to fetch, possibly relative to the manifest's location.
    Remote(String),
}

/// A single validation failure, keyed by a JSON-path-like field name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: String,
    pub reason: String,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ManifestError {
    /// The document is not decodable JSON of the expected shape.
    #[error("Malformed component manifest: {0}")]
    Malformed(String),

    /// One or more fields failed validation, in document order.
    #[error("Invalid component manifest: {}", describe(.0))]
    Invalid(Vec<FieldViolation>),
}

impl ManifestError {
    /// The first offending field, if the failure is field-specific.
    pub fn field(&self) -> Option<&str> {
        match self {
            ManifestError::Malformed(_) => None,
            ManifestError::Invalid(violations) => violations.first().map(|v| v.field.as_str()),
        }
    }

    pub fn violations(&self) -> &[FieldViolation] {
        match self {
            ManifestError::Malformed(_) => &[],
            ManifestError::Invalid(violations) => violations,
        }
    }
}

fn describe(violations: &[FieldViolation]) -> String {
    violations.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

#[derive(Debug, Deserialize)]
struct RawManifest {
    #[serde(default)]
    name: Option<Value>,
    #[serde(default)]
    version: Option<Value>,
    #[serde(default)]
    description: Option<Value>,
    #[serde(default)]
    category: Option<Value>,
    #[serde(default, rename = "type")]
    kind: Option<Value>,
    #[serde(default)]
    dependencies: Option<Value>,
    #[serde(default)]
    dev_dependencies: Option<Value>,
    #[serde(default)]
    registry_dependencies: Option<Value>,
    #[serde(default)]
    files: Option<Value>,
    #[serde(default)]
    author: Option<Value>,
    #[serde(default)]
    license: Option<Value>,
    #[serde(default)]
    homepage: Option<Value>,
    #[serde(default)]
    python_requires: Option<Value>,
    #[serde(default)]
    keywords: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RawFileEntry {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    path: Option<String>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default, alias = "url")]
    content_url: Option<String>,
}

/// Decode and validate manifest bytes.
pub fn parse(bytes: &[u8]) -> Result<ComponentManifest, ManifestError> {
    let raw: RawManifest =
        serde_json::from_slice(bytes).map_err(|e| ManifestError::Malformed(e.to_string()))?;
    validate(raw)
}

/// Accumulates violations while the raw document is walked.
#[derive(Default)]
struct Violations(Vec<FieldViolation>);

impl Violations {
    fn push(&mut self, field: impl Into<String>, reason: &str) {
        self.0.push(FieldViolation { field: field.into(), reason: reason.to_string() });
    }

    /// A trimmed optional string; anything but a string or null is a violation.
    fn string(&mut self, field: &str, value: Option<Value>) -> Option<String> {
        match value {
            None | Some(Value::Null) => None,
            Some(Value::String(text)) => Some(text.trim().to_string()),
            Some(_) => {
                self.push(field, "must be a string");
                None
            }
        }
    }

    /// An optional array of non-empty strings, trimmed.
    fn string_list(&mut self, field: &str, value: Option<Value>) -> Vec<String> {
        let items = match value {
            None | Some(Value::Null) => return Vec::new(),
            Some(Value::Array(items)) => items,
            Some(_) => {
                self.push(field, "must be an array of strings");
                return Vec::new();
            }
        };

        let mut list = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            match item {
                Value::String(text) if !text.trim().is_empty() => list.push(text.trim().to_string()),
                Value::String(_) => self.push(format!("{}[{}]", field, index), "must not be empty"),
                _ => self.push(format!("{}[{}]", field, index), "must be a string"),
            }
        }
        list
    }
}

fn validate(raw: RawManifest) -> Result<ComponentManifest, ManifestError> {
    let mut violations = Violations::default();

    let name = match raw.name {
        None | Some(Value::Null) => {
            violations.push("name", "is required");
            String::new()
        }
        value => match violations.string("name", value).as_deref() {
            None => String::new(),
            Some("") => {
                violations.push("name", "must not be empty");
                String::new()
            }
            Some(name) if !is_valid_name(name) => {
                violations.push("name", "must contain only ASCII letters, digits, '-' or '_'");
                String::new()
            }
            Some(name) => name.to_ascii_lowercase(),
        },
    };

    let version = match raw.version {
        None | Some(Value::Null) => {
            violations.push("version", "is required");
            String::new()
        }
        value => match violations.string("version", value) {
            None => String::new(),
            Some(version) if !is_semver_like(&version) => {
                violations.push("version", "must follow semantic versioning (e.g. 1.0.0)");
                String::new()
            }
            Some(version) => version,
        },
    };

    let description = violations.string("description", raw.description).unwrap_or_default();
    let category = violations
        .string("category", raw.category)
        .filter(|category| !category.is_empty())
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());
    let kind = violations
        .string("type", raw.kind)
        .filter(|kind| !kind.is_empty())
        .unwrap_or_else(|| DEFAULT_KIND.to_string());

    let dependencies = violations.string_list("dependencies", raw.dependencies);
    let dev_dependencies = violations.string_list("dev_dependencies", raw.dev_dependencies);
    let registry_dependencies =
        violations.string_list("registry_dependencies", raw.registry_dependencies);

    let files = validate_files(&mut violations, raw.files);

    let author = violations.string("author", raw.author);
    let license = violations.string("license", raw.license);
    let homepage = violations.string("homepage", raw.homepage);
    let python_requires = violations.string("python_requires", raw.python_requires);
    let keywords = violations.string_list("keywords", raw.keywords);

    if !violations.0.is_empty() {
        return Err(ManifestError::Invalid(violations.0));
    }

    Ok(ComponentManifest {
        name,
        version,
        description,
        category,
        kind,
        dependencies,
        dev_dependencies,
        registry_dependencies,
        files,
        author,
        license,
        homepage,
        python_requires,
        keywords,
    })
}

fn validate_files(violations: &mut Violations, value: Option<Value>) -> Vec<FileEntry> {
    let entries = match value {
        None | Some(Value::Null) => {
            violations.push("files", "is required");
            return Vec::new();
        }
        Some(Value::Array(entries)) if entries.is_empty() => {
            violations.push("files", "must contain at least one file");
            return Vec::new();
        }
        Some(Value::Array(entries)) => entries,
        Some(_) => {
            violations.push("files", "must be an array of file entries");
            return Vec::new();
        }
    };

    let mut files = Vec::with_capacity(entries.len());
    for (index, value) in entries.into_iter().enumerate() {
        let entry: RawFileEntry = match serde_json::from_value(value) {
            Ok(entry) => entry,
            Err(e) => {
                violations.push(format!("files[{}]", index), &e.to_string());
                continue;
            }
        };

        let name = entry.name.as_deref().map(str::trim).unwrap_or_default();
        let path = entry.path.as_deref().map(str::trim).unwrap_or_default();
        if name.is_empty() {
            violations.push(format!("files[{}].name", index), "must not be empty");
        }
        if path.is_empty() {
            violations.push(format!("files[{}].path", index), "must not be empty");
        }

        let content = entry.content.filter(|content| !content.is_empty());
        let content_url =
            entry.content_url.map(|url| url.trim().to_string()).filter(|url| !url.is_empty());

        let source = match (content, content_url) {
            (Some(content), _) => FileSource::Inline(content),
            (None, Some(url)) => FileSource::Remote(url),
            (None, None) => {
                violations.push(
                    format!("files[{}]", index),
                    "requires a non-empty 'content' or 'content_url'",
                );
                continue;
            }
        };

        files.push(FileEntry { name: name.to_string(), path: path.to_string(), source });
    }
    files
}

fn is_valid_name(name: &str) -> bool {
    name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// `MAJOR.MINOR.PATCH` digits, optionally followed by a `-pre` or `+build` suffix.
fn is_semver_like(version: &str) -> bool {
    let core_end = version.find(['-', '+']).unwrap_or(version.len());
    let (core, suffix) = version.split_at(core_end);
    let parts: Vec<&str> = core.split('.').collect();

    parts.len() == 3
        && parts.iter().all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()))
        && (suffix.is_empty() || suffix.len() > 1)
}
