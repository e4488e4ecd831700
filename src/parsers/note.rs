//! Document parser: free-form note text into ordered task/session records.

use crate::config::IndexerConfig;
use crate::models::{ParseWarning, Record, RecordKind};
use crate::parsers::duration::parse_duration_token;

/// The result of parsing one document: records in line order plus any
/// non-fatal warnings encountered along the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOutcome {
    pub records: Vec<Record>,
    pub warnings: Vec<ParseWarning>,
}

/// Outcome of matching one line against the checkbox grammar.
enum TaskMatch {
    /// The line is not a checkbox attempt at all (plain prose or list item).
    None,
    /// A well-formed checkbox item.
    Task { completed: bool, text: String },
    /// Looked like a checkbox attempt but is malformed.
    Malformed(String),
}

/// Parse a document into records and warnings.
///
/// Never fails: malformed marker-like lines produce a warning and are
/// skipped, and parsing continues with the remainder of the document. For
/// identical `text` the output is byte-for-byte identical across calls.
pub fn parse_document(key: &str, text: &str, config: &IndexerConfig) -> ParseOutcome {
    let mut outcome = ParseOutcome::default();

    // Soft guard: one pathological document must not stall a whole rescan.
    if text.len() as u64 > config.max_document_bytes {
        outcome.warnings.push(ParseWarning::whole_document(
            key,
            format!(
                "document is {} bytes (limit {}), skipping",
                text.len(),
                config.max_document_bytes
            ),
        ));
        return outcome;
    }

    for (idx, line) in text.lines().enumerate() {
        let line_no = (idx + 1) as u32;

        match match_task(line, config) {
            TaskMatch::Task { completed, text } => {
                outcome.records.push(Record {
                    document: key.to_string(),
                    line: line_no,
                    text,
                    raw: line.to_string(),
                    kind: RecordKind::Task { completed },
                });
                // A task line is one record; an inline session tag inside it
                // is ordinary task text.
                continue;
            }
            TaskMatch::Malformed(message) => {
                outcome.warnings.push(ParseWarning::new(key, line_no, message));
                continue;
            }
            TaskMatch::None => {}
        }

        match match_session(line, config) {
            Ok(Some((duration_secs, text))) => {
                outcome.records.push(Record {
                    document: key.to_string(),
                    line: line_no,
                    text,
                    raw: line.to_string(),
                    kind: RecordKind::Session { duration_secs },
                });
            }
            Ok(None) => {}
            Err(message) => {
                outcome.warnings.push(ParseWarning::new(key, line_no, message));
            }
        }
    }

    outcome
}

/// Match a line against the checkbox-item grammar (`- [ ] text` / `- [x] text`).
///
/// Leading whitespace is ignored. `*` bullets participate only when
/// `config.star_bullets` is set; a bullet without an opening bracket is plain
/// prose, not an attempt. A bullet glyph immediately followed by `[` (no
/// space) is an attempt, and malformed.
fn match_task(line: &str, config: &IndexerConfig) -> TaskMatch {
    let trimmed = line.trim_start();

    let is_bullet =
        trimmed.starts_with('-') || (config.star_bullets && trimmed.starts_with('*'));
    if !is_bullet {
        return TaskMatch::None;
    }

    let after_bullet = &trimmed[1..];
    let body = after_bullet.strip_prefix(' ').unwrap_or(after_bullet);
    if !body.starts_with('[') {
        return TaskMatch::None;
    }
    if !after_bullet.starts_with(' ') {
        return TaskMatch::Malformed("missing space between bullet and checkbox".to_string());
    }

    let Some(close) = body.find(']') else {
        return TaskMatch::Malformed("unclosed checkbox bracket".to_string());
    };

    let completed = match &body[1..close] {
        " " => false,
        "x" | "X" => true,
        other => {
            return TaskMatch::Malformed(format!("unrecognized checkbox marker '[{}]'", other));
        }
    };

    let text = body[close + 1..].trim();
    if text.is_empty() {
        return TaskMatch::Malformed("checkbox marker with no task text".to_string());
    }

    TaskMatch::Task { completed, text: text.to_string() }
}

/// Match a line against the session grammar: a session tag token followed by
/// a duration token, with the remaining tokens as the description.
///
/// The tag may appear anywhere in the line (inline annotations in prose are
/// valid). Returns `Err` with a warning message when the tag is present but
/// the duration is missing or unparseable.
fn match_session(
    line: &str,
    config: &IndexerConfig,
) -> Result<Option<(u64, String)>, String> {
    let mut tokens = line.split_whitespace();

    let found = tokens.by_ref().any(|t| t.eq_ignore_ascii_case(&config.session_tag));
    if !found {
        return Ok(None);
    }

    let Some(duration_token) = tokens.next() else {
        return Err(format!("session tag '{}' without a duration", config.session_tag));
    };

    let Some(duration_secs) = parse_duration_token(duration_token) else {
        return Err(format!("unrecognized duration token '{}'", duration_token));
    };

    let text = tokens.collect::<Vec<_>>().join(" ");
    Ok(Some((duration_secs, text)))
}
