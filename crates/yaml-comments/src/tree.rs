/*
 * tree.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Parsed structure of a YAML document.
//!
//! The tree only answers existence questions ("is there a key `views` below
//! `projects`?"), so scalars keep their source text instead of being
//! resolved to typed values. That way a key such as `1.0` compares equal to
//! the text the line scanner extracts from `1.0:`.

use std::collections::HashMap;

use yaml_rust2::parser::{Event, MarkedEventReceiver, Parser};
use yaml_rust2::scanner::{Marker, TScalarStyle};

/// A node of the parsed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Scalar(String),
    Sequence(Vec<Node>),
    /// Entries in document order. Keys may themselves be collections.
    Mapping(Vec<(Node, Node)>),
}

impl Node {
    fn null() -> Self {
        Node::Scalar(String::new())
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Node::Scalar(text) => Some(text),
            _ => None,
        }
    }

    /// Look up a mapping entry by its key text.
    ///
    /// Returns `None` for sequences and scalars. When a key occurs more than
    /// once, the first entry wins.
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Node::Mapping(entries) => entries
                .iter()
                .find(|(k, _)| k.as_scalar() == Some(key))
                .map(|(_, value)| value),
            _ => None,
        }
    }

    /// Whether `value` is one of the scalar members of this collection.
    ///
    /// Sequences are searched by item, mappings by entry value. Order and
    /// position are irrelevant.
    pub fn contains_value(&self, value: &str) -> bool {
        match self {
            Node::Sequence(items) => items.iter().any(|item| item.as_scalar() == Some(value)),
            Node::Mapping(entries) => entries.iter().any(|(_, v)| v.as_scalar() == Some(value)),
            Node::Scalar(_) => false,
        }
    }
}

/// What the parser learned about the first document of a stream.
#[derive(Debug, Default)]
pub(crate) struct Parsed {
    /// `None` when the stream holds no document at all (empty,
    /// whitespace-only or comment-only input).
    pub root: Option<Node>,
    /// Zero-based lines carrying a `|` or `>` block scalar indicator.
    pub block_scalars: Vec<usize>,
}

/// Parse the first YAML document in `content`.
pub(crate) fn parse(content: &str) -> Result<Parsed, yaml_rust2::ScanError> {
    let mut parser = Parser::new_from_str(content);
    let mut builder = TreeBuilder::default();
    parser.load(&mut builder, false)?;
    Ok(Parsed {
        root: builder.root,
        block_scalars: builder.block_scalars,
    })
}

/// Builds a [`Node`] tree from parser events.
#[derive(Default)]
struct TreeBuilder {
    /// Collections still being filled, innermost last.
    stack: Vec<Frame>,
    /// Nodes registered under an anchor, for alias resolution.
    anchors: HashMap<usize, Node>,
    root: Option<Node>,
    block_scalars: Vec<usize>,
}

enum Frame {
    Sequence {
        anchor_id: usize,
        items: Vec<Node>,
    },
    Mapping {
        anchor_id: usize,
        entries: Vec<(Node, Option<Node>)>,
    },
}

impl TreeBuilder {
    fn complete(&mut self, node: Node, anchor_id: usize) {
        if anchor_id > 0 {
            self.anchors.insert(anchor_id, node.clone());
        }

        match self.stack.last_mut() {
            None => {
                // Later documents in the stream are ignored.
                if self.root.is_none() {
                    self.root = Some(node);
                }
            }
            Some(Frame::Sequence { items, .. }) => items.push(node),
            Some(Frame::Mapping { entries, .. }) => match entries.last_mut() {
                Some((_, value @ None)) => *value = Some(node),
                _ => entries.push((node, None)),
            },
        }
    }
}

impl MarkedEventReceiver for TreeBuilder {
    fn on_event(&mut self, ev: Event, mark: Marker) {
        match ev {
            Event::Scalar(value, style, anchor_id, _tag) => {
                // Block scalars are marked at their indicator; lines count from 1.
                if matches!(style, TScalarStyle::Literal | TScalarStyle::Folded)
                    && self.root.is_none()
                {
                    self.block_scalars.push(mark.line().saturating_sub(1));
                }
                self.complete(Node::Scalar(value), anchor_id);
            }

            Event::SequenceStart(anchor_id, _tag) => {
                self.stack.push(Frame::Sequence {
                    anchor_id,
                    items: Vec::new(),
                });
            }

            Event::SequenceEnd => {
                if let Some(Frame::Sequence { anchor_id, items }) = self.stack.pop() {
                    self.complete(Node::Sequence(items), anchor_id);
                }
            }

            Event::MappingStart(anchor_id, _tag) => {
                self.stack.push(Frame::Mapping {
                    anchor_id,
                    entries: Vec::new(),
                });
            }

            Event::MappingEnd => {
                if let Some(Frame::Mapping { anchor_id, entries }) = self.stack.pop() {
                    let entries = entries
                        .into_iter()
                        .map(|(key, value)| (key, value.unwrap_or_else(Node::null)))
                        .collect();
                    self.complete(Node::Mapping(entries), anchor_id);
                }
            }

            Event::Alias(anchor_id) => {
                let node = self.anchors.get(&anchor_id).cloned().unwrap_or_else(Node::null);
                self.complete(node, 0);
            }

            _ => {}
        }
    }
}
