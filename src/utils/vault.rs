//! Host-side vault helpers: document enumeration, guarded reads, and the
//! atomic publish of the aggregated output.
//!
//! The core itself never touches the filesystem; these functions are the
//! "shell" collaborators the CLI wires up around [`crate::Indexer`].

use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use walkdir::WalkDir;

/// Enumerate all indexable documents under `root`.
///
/// Returns `(key, path)` pairs ordered by key, where the key is the
/// vault-relative path with `/` separators. Only `.md` files participate;
/// `exclude` (the published output file) is skipped so the index never feeds
/// on its own rendering.
pub fn enumerate_vault(root: &Path, exclude: Option<&Path>) -> Result<Vec<(String, PathBuf)>> {
    let mut documents = Vec::new();

    for entry in WalkDir::new(root) {
        let entry = entry.with_context(|| format!("Failed to walk vault: {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let is_markdown = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("md"));
        if !is_markdown {
            continue;
        }
        if exclude.is_some_and(|e| e == path) {
            continue;
        }
        documents.push((document_key(root, path), path.to_path_buf()));
    }

    documents.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(documents)
}

/// Stable key for a document: its vault-relative path with `/` separators.
pub fn document_key(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Read a document's text, enforcing the size limit first.
pub fn read_document(path: &Path, max_bytes: u64) -> Result<String> {
    let mut file = File::open(path)
        .with_context(|| format!("Failed to open document: {}", path.display()))?;
    validate_file_size(&file, path, max_bytes)?;

    let mut text = String::new();
    file.read_to_string(&mut text)
        .with_context(|| format!("Failed to read document: {}", path.display()))?;
    Ok(text)
}

/// Validate that a file's size is within the limit.
///
/// Takes an open file handle to avoid TOCTOU (time-of-check-time-of-use)
/// race conditions where the file could be modified between the size check
/// and subsequent file operations.
pub fn validate_file_size(file: &File, path: &Path, max_bytes: u64) -> Result<()> {
    let metadata = file
        .metadata()
        .with_context(|| format!("Failed to read metadata: {}", path.display()))?;
    if metadata.len() > max_bytes {
        bail!(
            "Document too large: {} is {} bytes (limit {})",
            path.display(),
            metadata.len(),
            max_bytes
        );
    }
    Ok(())
}

/// Atomically replace the published aggregated output.
///
/// Writes to a sibling temporary path and renames it over the target, so an
/// observer never sees a transient empty or missing file. The previous output
/// stays intact when any step fails.
pub fn publish_output(path: &Path, content: &str) -> Result<()> {
    let file_name = path
        .file_name()
        .with_context(|| format!("Invalid output path: {}", path.display()))?;
    let tmp_path = path.with_file_name(format!(".{}.tmp", file_name.to_string_lossy()));

    fs::write(&tmp_path, content)
        .with_context(|| format!("Failed to write temporary output: {}", tmp_path.display()))?;

    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e).with_context(|| format!("Failed to publish output: {}", path.display()));
    }
    Ok(())
}
