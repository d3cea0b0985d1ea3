//! # yaml-comments
//!
//! Carry comments from a hand-edited YAML document into a regenerated copy
//! of it.
//!
//! Tools that parse, sort and re-serialize a YAML file (Drush regenerating a
//! `drupal.make.yml`, for instance) keep the data but lose every comment.
//! This crate puts the comments back. Each comment of the original document
//! is attached to its *structural path*, the chain of parent keys above it.
//! That path is then found again in the regenerated document, and the
//! comment is spliced in after the line that realizes it. Comments whose
//! path no longer exists are dropped.
//!
//! ## Example
//!
//! ```rust
//! use yaml_comments::{merge_comments, MergeOptions};
//!
//! let original = "# top\nfoo:\n  # nested\n  bar: 1\n";
//! let regenerated = "foo:\n  bar: 1\nbaz: 2\n";
//!
//! let merged = merge_comments(original, regenerated, &MergeOptions::default()).unwrap();
//! assert_eq!(merged.text, "# top\nfoo:\n  # nested\n  bar: 1\nbaz: 2");
//! ```

mod document;
mod error;
mod line;
mod matcher;
mod merge;
mod options;
mod path;
mod tree;

pub use document::Document;
pub use error::{Error, Result, Side};
pub use matcher::PathMatcher;
pub use merge::{CommentMerger, MergeReport, Merged};
pub use options::{BehindCursor, DEFAULT_INDENT_WIDTH, DEFAULT_VALUE_KEY, MergeOptions};
pub use path::{StructuralPath, resolve_path};
pub use tree::Node;

/// Parse both documents and merge the comments of `original` into
/// `regenerated`.
///
/// # Errors
///
/// Returns [`Error::InvalidOptions`] for unusable options and
/// [`Error::Parse`] when either document is not valid YAML.
pub fn merge_comments(original: &str, regenerated: &str, options: &MergeOptions) -> Result<Merged> {
    options.validate()?;
    let original = Document::parse(original, Side::Original)?;
    let regenerated = Document::parse(regenerated, Side::Regenerated)?;
    Ok(CommentMerger::new(&original, &regenerated, options).merge())
}
