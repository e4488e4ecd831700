//! Line-oriented grammar for markdown notes.
//!
//! # Error Handling Strategy
//!
//! This module follows a **graceful degradation** approach:
//!
//! - **Individual line failures**: A line that looks like an attempted marker
//!   but is malformed (unclosed bracket, unknown checkbox content, session tag
//!   with a bad duration) yields a [`ParseWarning`] and is skipped. Parsing
//!   always continues with the rest of the document; `parse_document` cannot
//!   fail.
//!
//! - **Ordinary prose is not an error**: lines that match no marker at all
//!   contribute no record and no warning.
//!
//! - **Warnings are values**: they are collected and returned alongside the
//!   records, never raised, so one noisy document can never block indexing of
//!   the others.
//!
//! Determinism: output depends only on the input text and the configuration.
//! No ambient time, randomness, or prior state is consulted, so identical text
//! always parses to byte-identical records and warnings.
//!
//! [`ParseWarning`]: crate::models::ParseWarning

pub mod duration;
pub mod note;

pub use duration::{format_duration, parse_duration_token};
pub use note::{ParseOutcome, parse_document};
