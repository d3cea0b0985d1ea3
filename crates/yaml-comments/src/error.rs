/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error types for comment merging.

use std::fmt;

use thiserror::Error;

/// Which of the two input documents an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The hand-edited document that still carries comments.
    Original,
    /// The mechanically regenerated document without comments.
    Regenerated,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Original => write!(f, "original"),
            Side::Regenerated => write!(f, "regenerated"),
        }
    }
}

/// Errors that abort a merge.
///
/// A comment whose structural path is missing from the regenerated document
/// is not an error; it is dropped and counted in the
/// [`MergeReport`](crate::MergeReport).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The YAML parser rejected non-empty document content.
    #[error("failed to parse {side} document: {message}")]
    Parse { side: Side, message: String },

    /// The merge options cannot describe a usable document layout.
    #[error("invalid merge options: {message}")]
    InvalidOptions { message: String },
}

/// Result type alias for yaml-comments operations.
pub type Result<T> = std::result::Result<T, Error>;
