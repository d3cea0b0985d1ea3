/*
 * merge.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The merge driver.
//!
//! One left-to-right pass over the original document. Each comment is
//! resolved to a structural path, located in the regenerated document, and
//! spliced in after its anchor line. Regenerated lines are copied through an
//! emission cursor that only ever moves forward, so the output is assembled
//! append-only.

use tracing::{debug, warn};

use crate::document::Document;
use crate::line::{entry_key, indent_depth, is_structural};
use crate::matcher::PathMatcher;
use crate::options::{BehindCursor, MergeOptions};
use crate::path::resolve_path;

/// Counts of what happened to the original document's comments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Comments before the first structural line, copied as a prefix.
    pub prefix: usize,
    /// Comments placed in the regenerated document.
    pub carried: usize,
    /// Comments whose structural path no longer exists.
    pub dropped: usize,
    /// Comments whose anchor had already been passed by the cursor. They are
    /// also counted in `carried` or `dropped` depending on the policy.
    pub behind_cursor: usize,
}

/// Result of a merge: the document text and what became of each comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Merged {
    pub text: String,
    pub report: MergeReport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// No structural line of the original document seen yet.
    AtStart,
    Scanning,
}

/// Where a comment goes relative to the regenerated lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    /// Directly after this line; the comment sits inside the block it opens.
    After(usize),
    /// Directly before this line; the comment introduces a top-level entry.
    Before(usize),
    /// After the last line; nothing follows the comment in the original.
    Trailer,
}

/// Reinserts the comments of `original` into `regenerated`.
pub struct CommentMerger<'a> {
    original: &'a Document,
    regenerated: &'a Document,
    options: &'a MergeOptions,
    /// Next regenerated line to emit.
    cursor: usize,
    output: Vec<String>,
    trailer: Vec<String>,
    report: MergeReport,
}

impl<'a> CommentMerger<'a> {
    pub fn new(
        original: &'a Document,
        regenerated: &'a Document,
        options: &'a MergeOptions,
    ) -> Self {
        Self {
            original,
            regenerated,
            options,
            cursor: 0,
            output: Vec::new(),
            trailer: Vec::new(),
            report: MergeReport::default(),
        }
    }

    pub fn merge(mut self) -> Merged {
        let original = self.original;
        let matcher = PathMatcher::new(self.regenerated, self.options);
        let mut phase = Phase::AtStart;

        for (index, line) in original.lines().iter().enumerate() {
            if !original.is_comment_line(index) {
                if is_structural(line) {
                    phase = Phase::Scanning;
                }
                continue;
            }

            if phase == Phase::AtStart {
                self.output.push(line.clone());
                self.report.prefix += 1;
                continue;
            }

            match self.placement(&matcher, index) {
                Some(placement) => self.place(placement, line),
                None => self.report.dropped += 1,
            }
        }

        self.emit_through(self.regenerated.len());
        let trailer = std::mem::take(&mut self.trailer);
        self.output.extend(trailer);

        Merged {
            text: self.finish(),
            report: self.report,
        }
    }

    /// Decide where the comment at `index` of the original document belongs,
    /// or `None` if its surroundings are gone from the regenerated document.
    fn placement(&self, matcher: &PathMatcher<'_>, index: usize) -> Option<Placement> {
        let lines = self.original.lines();
        let path = resolve_path(lines, index, self.options.indent_width);

        if !path.is_empty() {
            let anchor = matcher.locate(&path);
            match anchor {
                Some(anchor) => debug!(line = index + 1, path = %path, anchor = anchor + 1, "comment located"),
                None => debug!(line = index + 1, path = %path, "dropping comment with no counterpart"),
            }
            return anchor.map(Placement::After);
        }

        // A top-level comment after content introduces the next top-level entry.
        let next = lines[index + 1..].iter().find(|candidate| {
            is_structural(candidate) && indent_depth(candidate, self.options.indent_width) == 0
        });
        let Some(next) = next else {
            debug!(line = index + 1, "trailing comment");
            return Some(Placement::Trailer);
        };

        let key = entry_key(next);
        let anchor = matcher.top_level_line(&key);
        match anchor {
            Some(anchor) => debug!(line = index + 1, key = %key, anchor = anchor + 1, "top-level comment located"),
            None => debug!(line = index + 1, key = %key, "dropping comment for removed top-level entry"),
        }
        anchor.map(Placement::Before)
    }

    fn place(&mut self, placement: Placement, comment: &str) {
        let end = match placement {
            Placement::After(anchor) => anchor + 1,
            Placement::Before(anchor) => anchor,
            Placement::Trailer => {
                self.trailer.push(comment.to_string());
                self.report.carried += 1;
                return;
            }
        };

        if end < self.cursor {
            self.report.behind_cursor += 1;
            match self.options.behind_cursor {
                BehindCursor::Keep => {
                    warn!(
                        target_line = end,
                        emitted = self.cursor,
                        "comment anchor already emitted; keeping comment at current position"
                    );
                }
                BehindCursor::Drop => {
                    warn!(
                        target_line = end,
                        emitted = self.cursor,
                        "comment anchor already emitted; dropping comment"
                    );
                    self.report.dropped += 1;
                    return;
                }
            }
        }

        self.emit_through(end);
        self.output.push(comment.to_string());
        self.report.carried += 1;
    }

    /// Copy regenerated lines up to, but not including, `end`.
    ///
    /// Comment lines of the regenerated document are skipped; the original
    /// document is the only source of commentary. Block scalar text starting
    /// with `#` is data and is copied.
    fn emit_through(&mut self, end: usize) {
        let end = end.min(self.regenerated.len());
        while self.cursor < end {
            if !self.regenerated.is_comment_line(self.cursor) {
                if let Some(line) = self.regenerated.line(self.cursor) {
                    self.output.push(line.to_string());
                }
            }
            self.cursor += 1;
        }
    }

    /// Join the output and strip the single trailing newline.
    fn finish(&self) -> String {
        let mut text = String::new();
        for line in &self.output {
            text.push_str(line);
            text.push('\n');
        }
        if text.ends_with('\n') {
            text.pop();
        }
        text
    }
}
