//! Data models for the vault task index.
//!
//! This module defines the data structures used throughout the crate:
//!
//! - [`Record`] - One structured unit extracted from a document
//! - [`RecordKind`] - The variant payload (task checkbox or focus session)
//! - [`ParseWarning`] - A localized, non-fatal parse diagnostic
//!
//! Records carry their owning document key and 1-based source line so the
//! aggregated output can point back at the exact origin of every entry.

pub mod record;
pub mod warning;

pub use record::{Record, RecordKind};
pub use warning::ParseWarning;
