//! Integration tests for the wayfinder binary
//!
//! Only offline surfaces are exercised here: argument validation, the
//! status command against an empty document (no embeddings needed), and
//! error exit codes.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn wayfinder_cmd() -> Command {
    Command::cargo_bin("wayfinder").unwrap()
}

#[test]
fn test_help_lists_commands() {
    wayfinder_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("chat"))
        .stdout(predicate::str::contains("ask"))
        .stdout(predicate::str::contains("status"));
}

#[test]
fn test_ask_requires_a_query() {
    let dir = TempDir::new().unwrap();
    let doc = dir.path().join("notes.txt");
    std::fs::write(&doc, "content").unwrap();

    wayfinder_cmd()
        .arg("ask")
        .arg("--document")
        .arg(&doc)
        .assert()
        .failure()
        .stderr(predicate::str::contains("QUERY"));
}

#[test]
fn test_chat_requires_a_document() {
    wayfinder_cmd()
        .arg("chat")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--document"));
}

#[test]
fn test_status_missing_document_exits_not_found() {
    wayfinder_cmd()
        .arg("status")
        .arg("--document")
        .arg("/nonexistent/notes.txt")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Document not found"));
}

#[test]
fn test_status_empty_document_reports_zero_passages() {
    let dir = TempDir::new().unwrap();
    let doc = dir.path().join("empty.txt");
    std::fs::write(&doc, "").unwrap();

    wayfinder_cmd()
        .arg("status")
        .arg("--document")
        .arg(&doc)
        .assert()
        .success()
        .stdout(predicate::str::contains("Passages:        0"))
        .stdout(predicate::str::contains("in-memory"));
}
