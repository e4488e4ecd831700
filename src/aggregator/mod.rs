//! Deterministic rendering of a store snapshot.
//!
//! The aggregated output is derived, never hand-edited: it is fully
//! regenerated from a snapshot on every render and has no identity of its own.
//! Ordering is fixed so an unchanged snapshot always renders to byte-identical
//! text: the Tasks section precedes the Sessions section, and within each
//! section records sort by document key, then by source line.
//!
//! Every record in the snapshot maps to exactly one output line of the form
//!
//! ```text
//! ## Tasks
//!
//! - [ ] write spec (notes/a.md:1)
//! - [x] done already (notes/a.md:2)
//!
//! ## Sessions
//!
//! - 25m focus block (notes/b.md:1)
//! ```
//!
//! A section with no records is omitted; an empty snapshot renders the empty
//! string.

use crate::models::{Record, RecordKind};
use crate::parsers::duration::format_duration;

/// Render a snapshot into the aggregated output document.
pub fn render(snapshot: &[(String, Vec<Record>)]) -> String {
    let mut tasks: Vec<&Record> = Vec::new();
    let mut sessions: Vec<&Record> = Vec::new();

    for (_, records) in snapshot {
        for record in records {
            match record.kind {
                RecordKind::Task { .. } => tasks.push(record),
                RecordKind::Session { .. } => sessions.push(record),
            }
        }
    }

    // Snapshots arrive key-ordered with records in line order, but the
    // ordering contract holds for any input.
    let by_origin = |a: &&Record, b: &&Record| (&a.document, a.line).cmp(&(&b.document, b.line));
    tasks.sort_by(by_origin);
    sessions.sort_by(by_origin);

    let mut out = String::new();

    if !tasks.is_empty() {
        out.push_str("## Tasks\n\n");
        for record in &tasks {
            let RecordKind::Task { completed } = record.kind else { unreachable!() };
            let marker = if completed { 'x' } else { ' ' };
            out.push_str(&format!(
                "- [{}] {} ({}:{})\n",
                marker, record.text, record.document, record.line
            ));
        }
    }

    if !sessions.is_empty() {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str("## Sessions\n\n");
        for record in &sessions {
            let RecordKind::Session { duration_secs } = record.kind else { unreachable!() };
            if record.text.is_empty() {
                out.push_str(&format!(
                    "- {} ({}:{})\n",
                    format_duration(duration_secs),
                    record.document,
                    record.line
                ));
            } else {
                out.push_str(&format!(
                    "- {} {} ({}:{})\n",
                    format_duration(duration_secs),
                    record.text,
                    record.document,
                    record.line
                ));
            }
        }
    }

    out
}
