/*
 * cli.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Integration tests for the copy-comments executable.
 */

use pretty_assertions::assert_eq;
use std::ffi::OsStr;
use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

const ORIGINAL: &str = "\
# Drupal makefile
core: 7.x
projects:
  views:
    # Pinned for the exposed filter fix
    version: '3.13'
    patch:
      - 'https://www.drupal.org/files/issues/views-1.patch'
        # Upstream issue 1
      - 'https://www.drupal.org/files/issues/views-2.patch'
        # Upstream issue 2
";

const REGENERATED: &str = "\
core: 7.x
projects:
  views:
    patch:
      - 'https://www.drupal.org/files/issues/views-2.patch'
    version: '3.14'
";

fn copy_comments<P: AsRef<OsStr>>(args: &[P]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_copy-comments"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run copy-comments")
}

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("Failed to write input file");
    path
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("stdout is not UTF-8")
}

fn stderr(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).expect("stderr is not UTF-8")
}

#[test]
fn test_merges_comments_to_stdout() {
    let temp = TempDir::new().unwrap();
    let original = write(&temp, "old.make.yml", ORIGINAL);
    let regenerated = write(&temp, "new.make.yml", REGENERATED);

    let output = copy_comments(&[&original, &regenerated]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "\
# Drupal makefile
core: 7.x
projects:
  views:
    # Pinned for the exposed filter fix
    patch:
      - 'https://www.drupal.org/files/issues/views-2.patch'
        # Upstream issue 2
    version: '3.14'"
    );
}

#[test]
fn test_missing_files_are_empty_documents() {
    let temp = TempDir::new().unwrap();
    let regenerated = write(&temp, "new.yml", "foo: 1\n");
    let absent = temp.path().join("absent.yml");

    let output = copy_comments(&[&absent, &regenerated]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "foo: 1");

    let output = copy_comments(&[&absent, &absent]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "");
}

#[test]
fn test_wrong_argument_count_prints_usage() {
    let temp = TempDir::new().unwrap();
    let original = write(&temp, "old.yml", "foo: 1\n");

    for args in [vec![], vec![original.as_path()], vec![original.as_path(); 3]] {
        let output = copy_comments(&args);
        assert_eq!(output.status.code(), Some(1));
        assert!(stderr(&output).contains("Usage:"), "stderr: {}", stderr(&output));
        assert_eq!(stdout(&output), "");
    }
}

#[test]
fn test_help_exits_successfully() {
    let output = Command::new(env!("CARGO_BIN_EXE_copy-comments"))
        .arg("--help")
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(stdout(&output).contains("<ORIGINAL> <REGENERATED>"));
}

#[test]
fn test_malformed_yaml_fails_without_output() {
    let temp = TempDir::new().unwrap();
    let original = write(&temp, "old.yml", "# note\nfoo: 1\n");
    let regenerated = write(&temp, "new.yml", "foo: [1, 2\n");

    let output = copy_comments(&[&original, &regenerated]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "");
    assert!(
        stderr(&output).contains("failed to parse regenerated document"),
        "stderr: {}",
        stderr(&output)
    );
}

#[test]
fn test_unreadable_path_fails() {
    let temp = TempDir::new().unwrap();
    let regenerated = write(&temp, "new.yml", "foo: 1\n");

    let output = copy_comments(&[temp.path(), regenerated.as_path()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Failed to read"));
}

#[test]
fn test_logging_never_reaches_stdout() {
    let temp = TempDir::new().unwrap();
    let original = write(&temp, "old.yml", ORIGINAL);
    let regenerated = write(&temp, "new.yml", REGENERATED);

    let quiet = copy_comments(&[&original, &regenerated]);
    let verbose = Command::new(env!("CARGO_BIN_EXE_copy-comments"))
        .args([&original, &regenerated])
        .env("RUST_LOG", "debug")
        .output()
        .unwrap();

    assert!(verbose.status.success());
    assert_eq!(stdout(&verbose), stdout(&quiet));
    assert!(stderr(&verbose).contains("comment located"));
}

#[test]
fn test_value_key_flag_changes_matching() {
    let temp = TempDir::new().unwrap();
    let original = write(&temp, "old.yml", ORIGINAL);
    let regenerated = write(&temp, "new.yml", REGENERATED);

    let output = Command::new(env!("CARGO_BIN_EXE_copy-comments"))
        .args([original.as_os_str(), regenerated.as_os_str()])
        .args(["--value-key", "patches"])
        .env_remove("RUST_LOG")
        .output()
        .unwrap();

    // Without `patch` as a value key the patch comments have no home.
    assert!(output.status.success());
    assert!(!stdout(&output).contains("# Upstream issue"));
    assert!(stdout(&output).contains("# Pinned for the exposed filter fix"));
}
