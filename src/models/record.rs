use chrono::Duration;
use serde::{Deserialize, Serialize};

/// The variant payload of an extracted record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordKind {
    /// A checkbox list item (`- [ ]` / `- [x]`).
    Task { completed: bool },
    /// A focus session annotation with an explicit duration.
    Session { duration_secs: u64 },
}

/// One structured unit extracted from a document by the parser.
///
/// `line` is 1-based. `raw` preserves the captured source line verbatim so
/// callers can round-trip the original text; `text` is the extracted payload
/// (task title or session description).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub document: String,
    pub line: u32,
    pub text: String,
    pub raw: String,
    pub kind: RecordKind,
}

impl Record {
    pub fn is_task(&self) -> bool {
        matches!(self.kind, RecordKind::Task { .. })
    }

    pub fn is_session(&self) -> bool {
        matches!(self.kind, RecordKind::Session { .. })
    }

    /// Session duration as a [`chrono::Duration`], if this is a session record.
    ///
    /// Returns `None` for task records and for durations beyond chrono's
    /// representable range (the duration parser accepts any second count that
    /// fits in a `u64`).
    pub fn duration(&self) -> Option<Duration> {
        match self.kind {
            RecordKind::Session { duration_secs } => {
                let secs = i64::try_from(duration_secs).ok()?;
                Duration::try_seconds(secs)
            }
            RecordKind::Task { .. } => None,
        }
    }
}
