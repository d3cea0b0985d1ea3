/*
 * options.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Tunable parts of the merge: indentation unit, value-matched keys, and
//! the policy for comments whose anchor was already emitted.

use crate::{Error, Result};

/// Spaces per nesting level assumed when none is configured.
pub const DEFAULT_INDENT_WIDTH: usize = 2;

/// Mapping key whose entries are matched by value rather than by key.
///
/// Drush makefiles list patches as quoted URLs under `patch:`; the order of
/// that list is not stable between regenerations.
pub const DEFAULT_VALUE_KEY: &str = "patch";

/// What to do with a comment whose anchor line lies behind the emission
/// cursor, i.e. new-document lines after the anchor were already written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BehindCursor {
    /// Emit the comment at the current output position.
    #[default]
    Keep,
    /// Discard the comment.
    Drop,
}

/// Options controlling how comments are resolved and placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOptions {
    /// Leading whitespace characters per nesting level.
    pub indent_width: usize,
    /// Keys below which path segments are matched against collection values.
    pub value_keys: Vec<String>,
    /// Policy for anchors that the emission cursor already passed.
    pub behind_cursor: BehindCursor,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            indent_width: DEFAULT_INDENT_WIDTH,
            value_keys: vec![DEFAULT_VALUE_KEY.to_string()],
            behind_cursor: BehindCursor::default(),
        }
    }
}

impl MergeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    /// Replace the set of value-matched keys.
    pub fn with_value_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.value_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_behind_cursor(mut self, policy: BehindCursor) -> Self {
        self.behind_cursor = policy;
        self
    }

    /// Whether `key` switches path matching from keys to values.
    pub fn is_value_key(&self, key: &str) -> bool {
        self.value_keys.iter().any(|k| k == key)
    }

    /// Reject option combinations the line scanner cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.indent_width == 0 {
            return Err(Error::InvalidOptions {
                message: "indent width must be at least 1".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = MergeOptions::default();
        assert_eq!(options.indent_width, 2);
        assert!(options.is_value_key("patch"));
        assert!(!options.is_value_key("projects"));
        assert_eq!(options.behind_cursor, BehindCursor::Keep);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_builder_replaces_value_keys() {
        let options = MergeOptions::new()
            .with_indent_width(4)
            .with_value_keys(["patches", "urls"])
            .with_behind_cursor(BehindCursor::Drop);
        assert_eq!(options.indent_width, 4);
        assert!(!options.is_value_key("patch"));
        assert!(options.is_value_key("urls"));
        assert_eq!(options.behind_cursor, BehindCursor::Drop);
    }

    #[test]
    fn test_zero_indent_width_is_rejected() {
        let err = MergeOptions::new().with_indent_width(0).validate().unwrap_err();
        assert!(matches!(err, Error::InvalidOptions { .. }));
    }
}
