//! Tests for the `camt-extract` binary.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

fn fixture(name: &str) -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
        .display()
        .to_string()
}

#[test]
fn test_full_profile_prints_entries() {
    let output = Command::cargo_bin("camt-extract")
        .unwrap()
        .arg(fixture("january.xml"))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let text = String::from_utf8(output).unwrap();
    assert_eq!(text.lines().count(), 3);
    assert!(text.contains("\"entry_reference\":\"NTRY-0002\""));
}

#[test]
fn test_header_profile_prints_one_line() {
    Command::cargo_bin("camt-extract")
        .unwrap()
        .args([fixture("january.xml").as_str(), "--profile", "header"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"resource_url\":\"january.xml\""))
        .stdout(predicate::str::contains("\"statement_payload\":null"));
}

#[test]
fn test_missing_file_fails() {
    Command::cargo_bin("camt-extract")
        .unwrap()
        .arg("/nonexistent/statement.xml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: IO error"));
}
