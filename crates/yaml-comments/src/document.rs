/*
 * document.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The two inputs of a merge, each held as raw lines and as a parsed tree.

use crate::error::{Error, Result, Side};
use crate::line::{is_blank, is_comment, leading_width};
use crate::tree::{self, Node};

/// One input document. Immutable once loaded.
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// Raw lines, split on `\n` only. A `\r` before the break stays on its line.
    lines: Vec<String>,
    tree: Option<Node>,
    /// Per line, whether it belongs to the body of a `|` or `>` block scalar.
    scalar_body: Vec<bool>,
}

impl Document {
    /// Split `content` into lines and parse it.
    ///
    /// Empty content yields an empty document. Content the YAML parser
    /// rejects is an [`Error::Parse`] tagged with `side`.
    pub fn parse(content: &str, side: Side) -> Result<Self> {
        let parsed = tree::parse(content).map_err(|err| Error::Parse {
            side,
            message: err.to_string(),
        })?;

        let mut lines: Vec<String> = content.split('\n').map(str::to_string).collect();
        if lines.last().is_some_and(String::is_empty) {
            lines.pop();
        }

        let mut scalar_body = vec![false; lines.len()];
        for &indicator in &parsed.block_scalars {
            mark_scalar_body(&lines, indicator, &mut scalar_body);
        }

        Ok(Self {
            lines,
            tree: parsed.root,
            scalar_body,
        })
    }

    /// A document with no lines and no tree, as for a missing file.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The parsed root, or `None` when the document holds no YAML node.
    pub fn tree(&self) -> Option<&Node> {
        self.tree.as_ref()
    }

    /// Whether line `index` is text inside a block scalar rather than markup.
    pub fn is_scalar_body(&self, index: usize) -> bool {
        self.scalar_body.get(index).copied().unwrap_or(false)
    }

    /// Whether line `index` is a comment. Lines inside block scalars that
    /// happen to start with `#` are data and do not count.
    pub fn is_comment_line(&self, index: usize) -> bool {
        !self.is_scalar_body(index) && self.line(index).is_some_and(is_comment)
    }
}

/// Flag the lines of the block scalar whose indicator sits on `indicator`.
///
/// The first non-blank line after the indicator fixes the body indentation,
/// which must exceed the indicator line's own. The body runs until a
/// non-blank line is indented less than that.
fn mark_scalar_body(lines: &[String], indicator: usize, body: &mut [bool]) {
    let Some(first) = lines.get(indicator) else {
        return;
    };
    let parent = leading_width(first);
    let start = indicator + 1;

    let Some(content) = lines.iter().skip(start).find(|line| !is_blank(line)) else {
        return;
    };
    let indent = leading_width(content);
    if indent <= parent {
        return;
    }

    for (offset, line) in lines[start.min(lines.len())..].iter().enumerate() {
        if !is_blank(line) && leading_width(line) < indent {
            break;
        }
        body[start + offset] = true;
    }
}
