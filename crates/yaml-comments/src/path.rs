/*
 * path.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Structural paths and the backward walk that recovers them.

use std::fmt;

use crate::line::{indent_depth, is_structural, segment};

/// Parent identifiers from the document root down to a position.
///
/// Each segment is either a mapping key or the quoted value of a sequence
/// entry. An empty path denotes the document root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructuralPath(Vec<String>);

impl StructuralPath {
    pub fn new(segments: Vec<String>) -> Self {
        Self(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for StructuralPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "<root>");
        }
        write!(f, "{}", self.0.join(" > "))
    }
}

/// Recover the structural path of the line at `index`.
///
/// Walks backward from the line above `index`. Every structural line
/// shallower than the depth still being looked for becomes the next parent,
/// and the depth sought drops by one. The walk ends once the top-level parent
/// is found or the start of the document is reached.
pub fn resolve_path(lines: &[String], index: usize, indent_width: usize) -> StructuralPath {
    let Some(line) = lines.get(index) else {
        return StructuralPath::default();
    };

    let mut wanted = indent_depth(line, indent_width);
    let mut parents = Vec::with_capacity(wanted);

    for candidate in lines[..index].iter().rev() {
        if wanted == 0 {
            break;
        }
        if !is_structural(candidate) {
            continue;
        }
        if indent_depth(candidate, indent_width) < wanted {
            parents.push(segment(candidate));
            wanted -= 1;
        }
    }

    parents.reverse();
    StructuralPath(parents)
}
