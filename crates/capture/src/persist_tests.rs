// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use rstest::rstest;
use tempfile::TempDir;

#[rstest]
#[case("", "\n")]
#[case("foo", "foo\n")]
#[case("foo\n", "foo\n")]
#[case("foo\n\n", "foo\n\n")]
fn test_terminated(#[case] text: &str, #[case] expected: &str) {
    assert_eq!(terminated(text), expected);
}

#[test]
fn test_write_truncates_by_default() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.log");
    std::fs::write(&path, "old contents that are longer").unwrap();

    write_file(&path, "new\n", false).unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "new\n");
}

#[test]
fn test_write_appends() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.log");

    write_file(&path, "one\n", true).unwrap();
    write_file(&path, "two\n", true).unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "one\ntwo\n");
}

#[test]
fn test_write_error_names_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing").join("out.log");

    let err = write_file(&path, "x", false).unwrap_err();

    assert!(err.to_string().contains("out.log"));
}

#[tokio::test]
async fn test_write_async_appends() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.log");

    write_file_async(&path, "a\n", true).await.unwrap();
    write_file_async(&path, "b\n", true).await.unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "a\nb\n");
}

#[test]
fn test_options_deserialize_with_defaults() {
    let opts: WriteOptions = serde_json::from_str(r#"{"contents": "stderr"}"#).unwrap();

    assert_eq!(opts, WriteOptions::new().contents(Contents::Stderr));
    assert!(!opts.append);
}
