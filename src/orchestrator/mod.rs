//! The indexer service binding parser, store and aggregator to host events.
//!
//! # Error Handling Strategy
//!
//! The orchestrator combines graceful degradation with defensive checks:
//!
//! - **Per-document warnings**: parse warnings for one document never block
//!   processing of the others; they are collected and handed back to the
//!   caller with the successful result.
//!
//! - **Store corruption**: [`Indexer::render`] runs the store integrity check
//!   first. Development builds assert; in release the caller gets an error
//!   whose remedy is a forced full rescan, which rebuilds the store from
//!   scratch rather than patching it in place.
//!
//! - **Publish/read failures** stay on the host side (see [`crate::utils`]);
//!   the core never touches the filesystem itself.

use std::collections::BTreeMap;

use anyhow::Result;
use rayon::prelude::*;

use crate::aggregator;
use crate::config::IndexerConfig;
use crate::models::ParseWarning;
use crate::parsers::parse_document;
use crate::store::{Snapshot, Store};

/// Result of a full rescan: the freshly rendered output plus every parse
/// warning encountered across the document set.
#[derive(Debug, Clone)]
pub struct RescanOutcome {
    pub rendered: String,
    pub warnings: Vec<ParseWarning>,
    pub document_count: usize,
}

/// Result of an incremental update.
///
/// `rendered` is `Some` only when the configuration enables render-on-change
/// and the write was actually applied (not superseded by a newer generation).
#[derive(Debug, Clone)]
pub struct ChangeOutcome {
    pub warnings: Vec<ParseWarning>,
    pub rendered: Option<String>,
}

/// The note-indexing core: a per-document record store driven by full rescans
/// and single-document change notifications.
#[derive(Debug, Default)]
pub struct Indexer {
    config: IndexerConfig,
    store: Store,
}

impl Indexer {
    /// Create an indexer with an empty store and no prior session state.
    pub fn new(config: IndexerConfig) -> Self {
        Self { config, store: Store::new() }
    }

    pub fn config(&self) -> &IndexerConfig {
        &self.config
    }

    /// Empty the store, discarding all indexed documents and tombstones.
    pub fn initialize(&self) {
        self.store.clear();
    }

    /// Parse every document, rebuild the store wholesale, and render.
    ///
    /// Parses are mutually independent and fan out across the rayon pool; the
    /// render only happens after every parse has resolved. Replacing the store
    /// wholesale (rather than upserting key by key) guarantees no orphaned
    /// entries survive for documents deleted since the last scan.
    pub fn full_rescan(&self, documents: Vec<(String, String)>) -> Result<RescanOutcome> {
        self.full_rescan_with_unreadable(documents, &[])
    }

    /// Full rescan where some enumerated documents could not be read.
    ///
    /// Keys listed in `unreadable` keep their previous records instead of
    /// vanishing from the index: stale-but-present beats missing. Keys never
    /// indexed before stay absent.
    pub fn full_rescan_with_unreadable(
        &self,
        documents: Vec<(String, String)>,
        unreadable: &[String],
    ) -> Result<RescanOutcome> {
        let parsed: Vec<_> = documents
            .into_par_iter()
            .map(|(key, text)| {
                let outcome = parse_document(&key, &text, &self.config);
                (key, outcome)
            })
            .collect();

        let mut map = BTreeMap::new();
        let mut warnings = Vec::new();
        for (key, outcome) in parsed {
            warnings.extend(outcome.warnings);
            map.insert(key, outcome.records);
        }

        if !unreadable.is_empty() {
            let prior = self.store.snapshot();
            for key in unreadable {
                if let Some((_, records)) = prior.iter().find(|(k, _)| k == key) {
                    map.entry(key.clone()).or_insert_with(|| records.clone());
                }
            }
        }

        let document_count = map.len();
        self.store.replace_all(map);
        let rendered = self.render()?;

        Ok(RescanOutcome { rendered, warnings, document_count })
    }

    /// Reparse one document and upsert the result under a fresh generation.
    ///
    /// If a newer generation was applied in the meantime the parse result is
    /// discarded, so the latest content always wins.
    pub fn on_document_changed(&self, key: &str, text: &str) -> Result<ChangeOutcome> {
        let generation = self.store.begin_write(key);
        let outcome = parse_document(key, text, &self.config);
        let applied = self.store.upsert(key, generation, outcome.records);

        let rendered = if applied && self.config.render_on_change {
            Some(self.render()?)
        } else {
            None
        };

        Ok(ChangeOutcome { warnings: outcome.warnings, rendered })
    }

    /// Drop a deleted document from the index.
    pub fn on_document_deleted(&self, key: &str) {
        self.store.remove(key);
    }

    /// Render the current store contents.
    pub fn render(&self) -> Result<String> {
        self.store.check_integrity()?;
        Ok(aggregator::render(&self.store.snapshot()))
    }

    /// A consistent, key-ordered view of the current index.
    pub fn snapshot(&self) -> Snapshot {
        self.store.snapshot()
    }

    /// Number of documents currently indexed.
    pub fn document_count(&self) -> usize {
        self.store.document_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indexer() -> Indexer {
        Indexer::new(IndexerConfig::default())
    }

    #[test]
    fn test_full_rescan_renders_both_documents() {
        let idx = indexer();
        let outcome = idx
            .full_rescan(vec![
                ("A".to_string(), "- [ ] a".to_string()),
                ("B".to_string(), "- [x] b".to_string()),
            ])
            .unwrap();

        assert_eq!(outcome.document_count, 2);
        assert!(outcome.warnings.is_empty());
        assert_eq!(outcome.rendered, "## Tasks\n\n- [ ] a (A:1)\n- [x] b (B:1)\n");
    }

    #[test]
    fn test_full_rescan_drops_stale_keys() {
        let idx = indexer();
        idx.full_rescan(vec![
            ("a.md".to_string(), "- [ ] a".to_string()),
            ("b.md".to_string(), "- [ ] b".to_string()),
        ])
        .unwrap();

        let outcome = idx.full_rescan(vec![("a.md".to_string(), "- [ ] a".to_string())]).unwrap();
        assert_eq!(outcome.document_count, 1);
        assert!(!outcome.rendered.contains("b.md"));
    }

    #[test]
    fn test_incremental_update_does_not_render_by_default() {
        let idx = indexer();
        let outcome = idx.on_document_changed("a.md", "- [ ] new task").unwrap();
        assert!(outcome.rendered.is_none());
        assert_eq!(idx.document_count(), 1);
    }

    #[test]
    fn test_incremental_update_renders_when_configured() {
        let config = IndexerConfig { render_on_change: true, ..Default::default() };
        let idx = Indexer::new(config);
        let outcome = idx.on_document_changed("a.md", "- [ ] new task").unwrap();
        assert_eq!(outcome.rendered.as_deref(), Some("## Tasks\n\n- [ ] new task (a.md:1)\n"));
    }

    #[test]
    fn test_deletion_completeness() {
        let idx = indexer();
        idx.full_rescan(vec![
            ("a.md".to_string(), "- [ ] keep".to_string()),
            ("b.md".to_string(), "- [ ] drop".to_string()),
        ])
        .unwrap();

        idx.on_document_deleted("b.md");
        let rendered = idx.render().unwrap();
        assert!(rendered.contains("a.md"));
        assert!(!rendered.contains("b.md"));
    }

    #[test]
    fn test_change_replaces_wholesale_never_merges() {
        let idx = indexer();
        idx.on_document_changed("a.md", "- [ ] one\n- [ ] two").unwrap();
        idx.on_document_changed("a.md", "- [x] only").unwrap();

        let snapshot = idx.snapshot();
        assert_eq!(snapshot[0].1.len(), 1);
        assert_eq!(snapshot[0].1[0].text, "only");
    }

    #[test]
    fn test_warnings_do_not_block_other_documents() {
        let idx = indexer();
        let outcome = idx
            .full_rescan(vec![
                ("bad.md".to_string(), "- [ broken".to_string()),
                ("good.md".to_string(), "- [ ] fine".to_string()),
            ])
            .unwrap();

        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(outcome.warnings[0].document, "bad.md");
        assert!(outcome.rendered.contains("good.md"));
    }

    #[test]
    fn test_rescan_keeps_unreadable_documents_stale() {
        let idx = indexer();
        idx.full_rescan(vec![
            ("a.md".to_string(), "- [ ] a".to_string()),
            ("b.md".to_string(), "- [ ] stale but present".to_string()),
        ])
        .unwrap();

        // b.md failed to read this time around; its old records survive.
        let outcome = idx
            .full_rescan_with_unreadable(
                vec![("a.md".to_string(), "- [ ] a".to_string())],
                &["b.md".to_string()],
            )
            .unwrap();
        assert_eq!(outcome.document_count, 2);
        assert!(outcome.rendered.contains("stale but present"));
    }

    #[test]
    fn test_rescan_unreadable_unknown_key_stays_absent() {
        let idx = indexer();
        let outcome = idx
            .full_rescan_with_unreadable(
                vec![("a.md".to_string(), "- [ ] a".to_string())],
                &["never-seen.md".to_string()],
            )
            .unwrap();
        assert_eq!(outcome.document_count, 1);
    }

    #[test]
    fn test_initialize_empties_store() {
        let idx = indexer();
        idx.on_document_changed("a.md", "- [ ] task").unwrap();
        idx.initialize();
        assert_eq!(idx.document_count(), 0);
        assert_eq!(idx.render().unwrap(), "");
    }
}
