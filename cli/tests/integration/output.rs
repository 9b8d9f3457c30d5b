//! JSON output contract tests for bcp CLI.

#[path = "../common/mod.rs"]
mod common;

use assert_cmd::cargo::cargo_bin_cmd;
use common::TestFixture;
use predicates::prelude::*;
use serde_json::Value;

#[test]
fn test_copy_json_contract() {
    let fx = TestFixture::new();
    let src = fx.write_pattern("src.bin", 2500);
    let dst = fx.path("dst.bin");

    let output = cargo_bin_cmd!("bcp")
        .args(["--output", "json", "-s", "block", "--verify"])
        .arg(&src)
        .arg(&dst)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let payload: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(payload["schema_version"], "1.0");
    assert_eq!(payload["mode"], "copy");
    assert_eq!(payload["outcome"], "copied");
    assert_eq!(payload["strategy"], "block");
    assert_eq!(payload["count"], 2500);
    assert_eq!(payload["unit"], "bytes");
    assert_eq!(payload["verified"], true);
    assert_eq!(payload["source"], src.display().to_string());
    assert_eq!(payload["destination"], dst.display().to_string());
    assert_eq!(payload["effective_config"]["block_size"], 1024);
    assert_eq!(payload["effective_config"]["encoding"], "UTF-8");
}

#[test]
fn test_lines_json_reports_lines() {
    let fx = TestFixture::new();
    let src = fx.write("src.txt", "alpha\nbeta\ngamma\n");
    let dst = fx.path("dst.txt");

    let output = cargo_bin_cmd!("bcp")
        .args(["--output", "json", "-s", "lines", "--verify"])
        .arg(&src)
        .arg(&dst)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let payload: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(payload["count"], 3);
    assert_eq!(payload["unit"], "lines");
    assert!(payload["verified"].is_null());
}

#[test]
fn test_failure_json_contract() {
    let fx = TestFixture::new();
    let missing = fx.path("missing.bin");
    let dst = fx.path("dst.bin");

    let output = cargo_bin_cmd!("bcp")
        .args(["--output", "json"])
        .arg(&missing)
        .arg(&dst)
        .assert()
        .code(1)
        .get_output()
        .stdout
        .clone();

    let payload: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(payload["outcome"], "failed");
    assert_eq!(payload["error_code"], "not_found");
    assert_eq!(payload["strategy"], "whole");
    assert!(
        payload["error_message"]
            .as_str()
            .unwrap()
            .contains("missing.bin")
    );
}

#[test]
fn test_compare_json_contract() {
    let fx = TestFixture::new();
    let a = fx.write("a.txt", "one");
    let b = fx.write("b.txt", "two");

    let output = cargo_bin_cmd!("bcp")
        .args(["--compare", "--output", "json"])
        .arg(&a)
        .arg(&b)
        .assert()
        .code(1)
        .get_output()
        .stdout
        .clone();

    let payload: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(payload["mode"], "compare");
    assert_eq!(payload["outcome"], "differ");
    assert_eq!(payload["equal"], false);
    assert_eq!(payload["first"], a.display().to_string());
    assert_eq!(payload["second"], b.display().to_string());
}

#[test]
fn test_compare_failure_json_contract() {
    let fx = TestFixture::new();
    let a = fx.write("a.txt", "one");
    let missing = fx.path("missing.txt");

    let output = cargo_bin_cmd!("bcp")
        .args(["--compare", "--output", "json"])
        .arg(&a)
        .arg(&missing)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error[not_found]"))
        .get_output()
        .stdout
        .clone();

    let payload: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(payload["schema_version"], "1.0");
    assert_eq!(payload["mode"], "compare");
    assert_eq!(payload["outcome"], "failed");
    assert_eq!(payload["error_code"], "not_found");
    assert_eq!(payload["first"], a.display().to_string());
    assert_eq!(payload["second"], missing.display().to_string());
    assert!(
        payload["error_message"]
            .as_str()
            .unwrap()
            .contains("missing.txt")
    );
}

#[test]
fn test_same_file_failure_json() {
    let fx = TestFixture::new();
    let file = fx.write("notes.txt", "keep");

    let output = cargo_bin_cmd!("bcp")
        .args(["--output", "json", "-s", "block"])
        .arg(&file)
        .arg(&file)
        .assert()
        .code(2)
        .get_output()
        .stdout
        .clone();

    let payload: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(payload["outcome"], "failed");
    assert_eq!(payload["error_code"], "invalid_input");
    fx.assert_bytes(&file, "keep");
}
