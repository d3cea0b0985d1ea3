/*
 * line.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Classification of raw document lines.
//!
//! Both the backward walk over the original document and the forward walk
//! over the regenerated one read lines through these helpers, so a segment
//! extracted from one side compares equal to the same line on the other.

/// First non-blank character of a comment line.
pub const COMMENT_MARKER: char = '#';

/// Trailing character of a line that opens a nested block mapping.
pub const MAPPING_MARKER: char = ':';

/// Leading character of a block sequence entry.
pub const SEQUENCE_MARKER: char = '-';

const QUOTE: char = '\'';

pub fn is_comment(line: &str) -> bool {
    line.trim().starts_with(COMMENT_MARKER)
}

pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Lines that carry no structure: comments and blank lines.
pub fn is_structural(line: &str) -> bool {
    !is_blank(line) && !is_comment(line)
}

/// Nesting depth of `line`: leading whitespace divided by `indent_width`.
///
/// Indentation that is not a multiple of the width truncates toward the
/// shallower level.
pub fn indent_depth(line: &str, indent_width: usize) -> usize {
    leading_width(line) / indent_width.max(1)
}

/// Bytes of leading whitespace.
pub fn leading_width(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

/// The path segment a line contributes when it is a structural parent.
///
/// - `key:` yields `key`
/// - `- 'https://example.org/fix.patch'` yields the quoted text
/// - `- item` (no quotes) yields `item`
/// - anything else yields the trimmed line unchanged
pub fn segment(line: &str) -> String {
    let trimmed = line.trim();
    if let Some(key) = trimmed.strip_suffix(MAPPING_MARKER) {
        return key.to_string();
    }
    if let Some(entry) = trimmed.strip_prefix(SEQUENCE_MARKER) {
        return match first_quoted(entry) {
            Some(quoted) => quoted.to_string(),
            None => entry.trim().to_string(),
        };
    }
    trimmed.to_string()
}

/// The key a line introduces at its own level.
///
/// Unlike [`segment`], a `key: value` entry yields just `key`, so scalar
/// entries can be found by name. Lines that are not mapping entries fall
/// back to their segment.
pub fn entry_key(line: &str) -> String {
    let trimmed = line.trim();
    if let Some(key) = trimmed.strip_suffix(MAPPING_MARKER) {
        return key.to_string();
    }
    if !trimmed.starts_with(SEQUENCE_MARKER) {
        if let Some((key, _)) = trimmed.split_once(": ") {
            return key.to_string();
        }
    }
    segment(line)
}

/// Text between the first pair of single quotes, if there is a pair.
fn first_quoted(text: &str) -> Option<&str> {
    let mut parts = text.splitn(3, QUOTE);
    parts.next()?;
    let inner = parts.next()?;
    // An opening quote without a closing one is not a quoted value.
    parts.next()?;
    Some(inner)
}
