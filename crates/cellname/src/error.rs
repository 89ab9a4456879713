//! Error types for cellname operations.
//!
//! This module provides the main error type [`CellnameError`] which wraps
//! the failures that can end a run: a missing input, a malformed document,
//! an invalid configuration, or an I/O failure while reading or writing.

use std::{io, path::PathBuf};

use thiserror::Error;

/// The main error type for cellname operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the source text next to the XML error so the
/// position reported by the parser can be shown as a labelled snippet.
#[derive(Debug, Error)]
pub enum CellnameError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Input file not found: {}", .0.display())]
    MissingInput(PathBuf),

    #[error("Malformed document: {err}")]
    Parse { err: roxmltree::Error, src: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CellnameError {
    /// Create a new `Parse` error with the associated source text.
    pub fn new_parse_error(err: roxmltree::Error, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }

    /// Byte offset into the source text where a `Parse` error was detected.
    ///
    /// Returns `None` for other variants. Offsets past the end of the source
    /// are clamped to its length.
    pub fn parse_offset(&self) -> Option<usize> {
        let Self::Parse { err, src } = self else {
            return None;
        };
        let pos = err.pos();
        Some(offset_of(src, pos.row as usize, pos.col as usize))
    }
}

/// Convert a 1-based row/column (in characters) into a byte offset.
fn offset_of(src: &str, row: usize, col: usize) -> usize {
    let line_start = src
        .split_inclusive('\n')
        .take(row.saturating_sub(1))
        .map(str::len)
        .sum::<usize>();
    let line = &src[line_start.min(src.len())..];
    let in_line = line
        .char_indices()
        .nth(col.saturating_sub(1))
        .map_or(line.len(), |(idx, _)| idx);
    (line_start + in_line).min(src.len())
}
