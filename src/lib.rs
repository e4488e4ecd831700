//! vault-tasks - Index markdown tasks and focus sessions into one note
//!
//! This library turns a vault of free-form markdown documents into structured
//! task/session records, keeps that index consistent as individual documents
//! change, and renders a deterministic aggregated view. It supports:
//!
//! - Parsing checkbox items (`- [ ]` / `- [x]`) and `#session 25m` annotations
//! - A generation-ordered per-document record store that resolves racing
//!   change notifications
//! - Deterministic rendering of the whole index into a single output document
//! - Full rescans (parallel parse, wholesale replace) and incremental
//!   single-document updates
//!
//! # Example
//!
//! ```
//! use vault_tasks::{Indexer, IndexerConfig};
//!
//! let indexer = Indexer::new(IndexerConfig::default());
//! let outcome = indexer.full_rescan(vec![
//!     ("notes/today.md".to_string(), "- [ ] write spec".to_string()),
//! ])?;
//! assert!(outcome.rendered.contains("write spec"));
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod aggregator;
pub mod cli;
pub mod config;
pub mod models;
pub mod orchestrator;
pub mod parsers;
pub mod store;
pub mod utils;

// Re-export commonly used types
pub use config::IndexerConfig;
pub use models::{ParseWarning, Record, RecordKind};
pub use orchestrator::{ChangeOutcome, Indexer, RescanOutcome};
pub use parsers::{ParseOutcome, parse_document};
pub use store::Store;
