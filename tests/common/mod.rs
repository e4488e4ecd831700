//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// Builder for creating test vault directory structures
pub struct VaultBuilder {
    temp_dir: TempDir,
}

impl VaultBuilder {
    /// Create a new builder with an empty vault directory
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    /// Get the path to the vault root
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Add a markdown note at a vault-relative path, creating parent
    /// directories as needed
    pub fn with_note(self, relative_path: &str, content: &str) -> Self {
        let path = self.temp_dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create note parent dirs");
        }
        fs::write(path, content).expect("Failed to write note");
        self
    }

    /// Build and return the temp directory (consumes self)
    pub fn build(self) -> TempDir {
        self.temp_dir
    }
}

/// Read all notes in a vault into `(key, text)` pairs the way the CLI does.
pub fn read_vault(root: &Path) -> Vec<(String, String)> {
    vault_tasks::utils::enumerate_vault(root, None)
        .expect("Failed to enumerate vault")
        .into_iter()
        .map(|(key, path)| {
            let text = fs::read_to_string(&path).expect("Failed to read note");
            (key, text)
        })
        .collect()
}
