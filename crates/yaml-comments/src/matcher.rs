/*
 * matcher.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Locating a structural path in the regenerated document.
//!
//! Matching happens in two phases. The parsed tree first confirms that the
//! path still exists at all; only then is the raw text scanned for the line
//! that realizes it, since the tree carries no line numbers.

use crate::document::Document;
use crate::line::{entry_key, indent_depth, is_structural, segment};
use crate::options::MergeOptions;
use crate::path::StructuralPath;
use crate::tree::Node;

/// Resolves structural paths against one document.
pub struct PathMatcher<'a> {
    document: &'a Document,
    options: &'a MergeOptions,
}

impl<'a> PathMatcher<'a> {
    pub fn new(document: &'a Document, options: &'a MergeOptions) -> Self {
        Self { document, options }
    }

    /// Phase one: does `path` exist in the parsed tree?
    ///
    /// Segments descend by key until a value key (such as `patch`) has been
    /// passed; from then on each remaining segment must be a member of that
    /// collection's values.
    pub fn exists(&self, path: &StructuralPath) -> bool {
        if path.is_empty() {
            return true;
        }
        let Some(mut node) = self.document.tree() else {
            return false;
        };

        let mut by_value = false;
        for seg in path.segments() {
            if by_value {
                if !node.contains_value(seg) {
                    return false;
                }
                continue;
            }

            match node.get(seg) {
                Some(child) => node = child,
                None => return false,
            }
            if self.options.is_value_key(seg) {
                by_value = true;
            }
        }
        true
    }

    /// Phase two: index of the first line realizing `path`, scanning from the
    /// top of the document.
    ///
    /// The scan advances one level each time a structural line at the current
    /// level carries the expected segment.
    pub fn line_of(&self, path: &StructuralPath) -> Option<usize> {
        let segments = path.segments();
        if segments.is_empty() {
            return None;
        }

        let mut level = 0;
        for (index, line) in self.document.lines().iter().enumerate() {
            if !is_structural(line) || self.document.is_scalar_body(index) {
                continue;
            }
            if indent_depth(line, self.options.indent_width) == level
                && segment(line) == segments[level]
            {
                level += 1;
                if level == segments.len() {
                    return Some(index);
                }
            }
        }
        None
    }

    /// First top-level line whose entry key is `key`, provided the parsed
    /// tree still has that entry.
    ///
    /// Top-level entries with scalar values (`core: 7.x`) are found as well
    /// as block openers, so comments introducing them can be placed.
    pub fn top_level_line(&self, key: &str) -> Option<usize> {
        let root = self.document.tree()?;
        let present = match root {
            Node::Sequence(_) => root.contains_value(key),
            _ => root.get(key).is_some(),
        };
        if !present {
            return None;
        }

        self.document.lines().iter().enumerate().position(|(index, line)| {
            is_structural(line)
                && !self.document.is_scalar_body(index)
                && indent_depth(line, self.options.indent_width) == 0
                && entry_key(line) == key
        })
    }

    /// Both phases together: the line index realizing `path`, or `None` when
    /// the path has no counterpart in this document.
    ///
    /// The root path has no line of its own and never matches.
    pub fn locate(&self, path: &StructuralPath) -> Option<usize> {
        if path.is_empty() || !self.exists(path) {
            return None;
        }

        let found = self.line_of(path);
        if found.is_none() {
            tracing::warn!(
                path = %path,
                "path exists in the parsed document but no line matches it"
            );
        }
        found
    }
}
