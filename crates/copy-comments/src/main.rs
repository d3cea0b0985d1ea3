//! copy-comments - Main entry point
//!
//! Reads an old, hand-commented YAML file and its regenerated replacement,
//! and writes the regenerated content with the old comments put back to
//! stdout. Diagnostics go to stderr.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use yaml_comments::{
    BehindCursor, DEFAULT_INDENT_WIDTH, DEFAULT_VALUE_KEY, MergeOptions, merge_comments,
};

const AFTER_HELP: &str = "\
Both files are read; comments from ORIGINAL are copied into the content of
REGENERATED. The merged document is written to stdout, errors to stderr.
A file that does not exist is treated as empty.";

#[derive(Parser)]
#[command(name = "copy-comments")]
#[command(version)]
#[command(about = "Copy comments from an old YAML file into its regenerated version", long_about = None)]
#[command(after_help = AFTER_HELP)]
struct Cli {
    /// Previous version of the file, with comments
    original: PathBuf,

    /// Regenerated version of the file, without comments
    regenerated: PathBuf,

    /// Spaces per nesting level
    #[arg(long, value_name = "N", default_value_t = DEFAULT_INDENT_WIDTH as u8,
          value_parser = clap::value_parser!(u8).range(1..=16))]
    indent_width: u8,

    /// Key whose list entries are matched by value rather than position (repeatable)
    #[arg(long = "value-key", value_name = "KEY", default_value = DEFAULT_VALUE_KEY)]
    value_keys: Vec<String>,

    /// What to do with a comment whose anchor line was already written
    #[arg(long, value_enum, default_value_t = Unreachable::Keep)]
    on_unreachable: Unreachable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Unreachable {
    /// Write the comment where the output currently stands
    Keep,
    /// Leave the comment out
    Drop,
}

impl From<Unreachable> for BehindCursor {
    fn from(value: Unreachable) -> Self {
        match value {
            Unreachable::Keep => BehindCursor::Keep,
            Unreachable::Drop => BehindCursor::Drop,
        }
    }
}

impl Cli {
    fn merge_options(&self) -> MergeOptions {
        MergeOptions::new()
            .with_indent_width(usize::from(self.indent_width))
            .with_value_keys(self.value_keys.iter().cloned())
            .with_behind_cursor(self.on_unreachable.into())
    }
}

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries only the merged document.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "copy_comments=warn,yaml_comments=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    // Usage errors exit with status 1 like every other failure.
    let cli = Cli::try_parse().unwrap_or_else(|err| {
        let code = if err.use_stderr() { 1 } else { 0 };
        let _ = err.print();
        std::process::exit(code);
    });

    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    let options = cli.merge_options();
    let original = read_document(&cli.original)?;
    let regenerated = read_document(&cli.regenerated)?;

    let merged = merge_comments(&original, &regenerated, &options)?;
    info!(
        prefix = merged.report.prefix,
        carried = merged.report.carried,
        dropped = merged.report.dropped,
        behind_cursor = merged.report.behind_cursor,
        "Merged comments"
    );

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(merged.text.as_bytes())
        .and_then(|()| stdout.flush())
        .context("Failed to write merged document to stdout")?;
    Ok(())
}

/// Read a document, treating a missing file as an empty one.
fn read_document(path: &Path) -> Result<String> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "File not found, treating it as empty");
            Ok(String::new())
        }
        Err(err) => Err(err).with_context(|| format!("Failed to read {}", path.display())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_reads_as_empty() {
        let temp = TempDir::new().unwrap();
        let content = read_document(&temp.path().join("absent.yml")).unwrap();
        assert_eq!(content, "");
    }

    #[test]
    fn test_existing_file_is_read() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("present.yml");
        fs::write(&path, "foo: 1\n").unwrap();
        assert_eq!(read_document(&path).unwrap(), "foo: 1\n");
    }

    #[test]
    fn test_directory_is_an_error() {
        let temp = TempDir::new().unwrap();
        let err = read_document(temp.path()).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read"));
    }

    #[test]
    fn test_options_from_flags() {
        let cli = Cli::try_parse_from([
            "copy-comments",
            "old.yml",
            "new.yml",
            "--indent-width",
            "4",
            "--value-key",
            "patches",
            "--value-key",
            "urls",
            "--on-unreachable",
            "drop",
        ])
        .unwrap();
        let options = cli.merge_options();
        assert_eq!(options.indent_width, 4);
        assert_eq!(options.value_keys, ["patches", "urls"]);
        assert_eq!(options.behind_cursor, BehindCursor::Drop);
    }

    #[test]
    fn test_default_flags_match_library_defaults() {
        let cli = Cli::try_parse_from(["copy-comments", "old.yml", "new.yml"]).unwrap();
        assert_eq!(cli.merge_options(), MergeOptions::default());
    }

    #[test]
    fn test_positional_count_is_enforced() {
        assert!(Cli::try_parse_from(["copy-comments", "old.yml"]).is_err());
        assert!(Cli::try_parse_from(["copy-comments", "a", "b", "c"]).is_err());
    }

    #[test]
    fn test_zero_indent_width_is_rejected() {
        assert!(
            Cli::try_parse_from(["copy-comments", "a", "b", "--indent-width", "0"]).is_err()
        );
    }
}
