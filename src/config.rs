//! Indexer configuration.
//!
//! The core takes an explicit [`IndexerConfig`] value at construction and
//! holds no global mutable state. The CLI can load one from a JSON file;
//! every field has a default, so a partial (or absent) file is fine.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

// Matches the guard applied when reading documents from disk: 10MB
const DEFAULT_MAX_DOCUMENT_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexerConfig {
    /// Token that introduces a session annotation (e.g. `#session 25m deep work`).
    pub session_tag: String,
    /// Accept `* [ ]` bullets in addition to `- [ ]`.
    pub star_bullets: bool,
    /// Re-render the aggregated output on every incremental update.
    ///
    /// Off by default: only an explicit rescan (or an explicit `render` call)
    /// produces output, and single-document edits just keep the store current.
    pub render_on_change: bool,
    /// Documents larger than this are skipped with a warning instead of parsed.
    pub max_document_bytes: u64,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            session_tag: "#session".to_string(),
            star_bullets: false,
            render_on_change: false,
            max_document_bytes: DEFAULT_MAX_DOCUMENT_BYTES,
        }
    }
}

impl IndexerConfig {
    /// Load a configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}
