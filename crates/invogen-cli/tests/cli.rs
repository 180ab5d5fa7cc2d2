//! Integration tests for the invogen binary.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn process_rejects_missing_input() {
    Command::cargo_bin("invogen")
        .unwrap()
        .args(["process", "does-not-exist.xlsx"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn process_rejects_undecodable_input() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("garbage.xlsx");
    std::fs::write(&path, b"not a workbook").unwrap();

    Command::cargo_bin("invogen")
        .unwrap()
        .arg("process")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("workbook"));
}

#[test]
fn config_init_writes_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");

    Command::cargo_bin("invogen")
        .unwrap()
        .args(["config", "init", "--output"])
        .arg(&path)
        .assert()
        .success();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("normalize_fractional_gst"));
}

#[test]
fn config_init_refuses_overwrite_without_force() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{}").unwrap();

    Command::cargo_bin("invogen")
        .unwrap()
        .args(["config", "init", "--output"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn batch_reports_empty_glob() {
    Command::cargo_bin("invogen")
        .unwrap()
        .args(["batch", "no-such-dir/*.xlsx"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching files"));
}
