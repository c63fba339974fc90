use std::collections::BTreeMap;

/// Directory used for categories without an explicit mapping.
pub const GENERIC_DEFAULT_DIR: &str = "src/components";

/// Built-in category → directory table, written into `structure` at full init.
pub const BUILTIN_CATEGORIES: &[(&str, &str)] = &[
    ("auth", "src/auth"),
    ("components", "src/components"),
    ("data", "src/data"),
    ("models", "src/models"),
    ("services", "src/services"),
    ("utils", "src/utils"),
];

/// Category → install directory mapping with a generic fallback.
///
/// Adding a category is a data change: either extend [`BUILTIN_CATEGORIES`] or
/// add an entry under `structure` in `.zen/config.yaml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTable {
    entries: BTreeMap<String, String>,
    fallback: String,
}

impl CategoryTable {
    pub fn builtin() -> Self {
        let entries = BUILTIN_CATEGORIES
            .iter()
            .map(|(category, dir)| (category.to_string(), dir.to_string()))
            .collect();
        Self { entries, fallback: GENERIC_DEFAULT_DIR.to_string() }
    }

    /// Built-in table with project-specific entries layered on top.
    pub fn with_overrides(structure: &BTreeMap<String, String>) -> Self {
        let mut table = Self::builtin();
        for (category, dir) in structure {
            let dir = dir.trim().trim_end_matches('/');
            if !dir.is_empty() {
                table.entries.insert(category.to_ascii_lowercase(), dir.to_string());
            }
        }
        table
    }

    /// Install directory for a category; unknown categories map to the fallback.
    pub fn directory_for(&self, category: &str) -> &str {
        self.entries.get(&category.to_ascii_lowercase()).unwrap_or(&self.fallback)
    }

    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self::builtin()
    }
}
