//! Temporary project directory wired to the real filesystem adapters.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use crate::adapters::{EmbeddedScaffoldStore, FilesystemStore};
use crate::app::AppContext;
use crate::domain::ProjectConfig;
use crate::ports::ConfigStore;

pub type TestContext = AppContext<FilesystemStore, FilesystemStore, EmbeddedScaffoldStore>;

pub struct TestProject {
    dir: TempDir,
    pub ctx: TestContext,
}

impl TestProject {
    /// Empty directory, not initialized.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let store = FilesystemStore::new(dir.path().to_path_buf());
        let ctx = AppContext::new(store.clone(), store, EmbeddedScaffoldStore::new());
        Self { dir, ctx }
    }

    /// Directory with a minimal `.zen/config.yaml`.
    pub fn initialized() -> Self {
        let project = Self::new();
        project.ctx.config().save(&ProjectConfig::new("demo", "1.0.0")).expect("seed config");
        project
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, path: &str, content: &str) {
        let full = self.root().join(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).expect("create parent");
        }
        fs::write(full, content).expect("write test file");
    }

    pub fn read(&self, path: &str) -> String {
        fs::read_to_string(self.root().join(path)).expect("read test file")
    }

    pub fn exists(&self, path: &str) -> bool {
        self.root().join(path).exists()
    }

    pub fn config(&self) -> ProjectConfig {
        self.ctx.config().load().expect("load config")
    }
}
