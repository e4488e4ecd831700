use std::fmt;

use serde::{Deserialize, Serialize};

/// A localized, non-fatal parse diagnostic.
///
/// Warnings are collected and returned alongside successful results; they are
/// never raised as errors. `line` is 1-based; `None` means the warning applies
/// to the document as a whole (e.g. the size guard).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseWarning {
    pub document: String,
    pub line: Option<u32>,
    pub message: String,
}

impl ParseWarning {
    pub fn new(document: impl Into<String>, line: u32, message: impl Into<String>) -> Self {
        Self { document: document.into(), line: Some(line), message: message.into() }
    }

    /// A warning about the document as a whole rather than one line.
    pub fn whole_document(document: impl Into<String>, message: impl Into<String>) -> Self {
        Self { document: document.into(), line: None, message: message.into() }
    }
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{}: {}", self.document, line, self.message),
            None => write!(f, "{}: {}", self.document, self.message),
        }
    }
}
