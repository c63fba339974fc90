//! Shared testing utilities for zen CLI tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zen::domain::ProjectConfig;
use zen::domain::project_config::parse_config_content;

pub const EMAIL_VALIDATOR_MANIFEST: &str = r#"{
    "name": "email-validator",
    "version": "1.0.0",
    "description": "Simple email validation utility",
    "category": "utils",
    "dependencies": ["validators"],
    "files": [
        {"name": "validator.py", "path": "validator.py", "content_url": "validator.py"}
    ]
}"#;

pub const VALIDATOR_SOURCE: &str = "import validators\n\n\ndef is_valid(email):\n    return bool(validators.email(email))\n";

/// Testing harness providing an isolated environment for CLI exercises.
///
/// `work/` is the directory commands run in; `registry/` holds local components.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated environment.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");
        Self { root, work_dir }
    }

    /// Path to the directory used for CLI invocations.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Build a command for invoking the compiled `zen` binary within the work directory.
    pub fn cli(&self) -> Command {
        self.cli_in(self.work_dir())
    }

    /// Build a command for invoking the compiled `zen` binary within a custom directory.
    pub fn cli_in<P: AsRef<Path>>(&self, dir: P) -> Command {
        let mut cmd = Command::cargo_bin("zen").expect("Failed to locate zen binary");
        cmd.current_dir(dir.as_ref()).env_remove("ZEN_LOG");
        cmd
    }

    /// Run `zen init --minimal` in the work directory.
    pub fn init_minimal(&self) {
        self.cli().args(["init", "--minimal"]).assert().success();
    }

    /// Absolute path of a work-directory relative path.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.work_dir.join(relative)
    }

    pub fn write_file(&self, relative: &str, content: &str) {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(path, content).expect("Failed to write test file");
    }

    pub fn read_file(&self, relative: &str) -> String {
        fs::read_to_string(self.path(relative))
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", relative, e))
    }

    /// Parsed `.zen/config.yaml` of the work directory.
    pub fn config(&self) -> ProjectConfig {
        parse_config_content(&self.read_file(".zen/config.yaml")).expect("config should parse")
    }

    /// Lay out a local registry component and return its directory.
    pub fn registry_component(&self, name: &str, manifest: &str, files: &[(&str, &str)]) -> PathBuf {
        let dir = self.root.path().join("registry").join(name);
        fs::create_dir_all(&dir).expect("Failed to create registry directory");
        fs::write(dir.join("component.json"), manifest).expect("Failed to write manifest");
        for (file, content) in files {
            fs::write(dir.join(file), content).expect("Failed to write registry file");
        }
        dir
    }

    /// The stock `email-validator` component, as a `file://` manifest URL.
    pub fn email_validator_url(&self) -> String {
        let dir = self.registry_component(
            "email-validator",
            EMAIL_VALIDATOR_MANIFEST,
            &[("validator.py", VALIDATOR_SOURCE)],
        );
        format!("file://{}", dir.join("component.json").display())
    }
}
