//! Comparison integration tests for bcp CLI.

#[path = "../common/mod.rs"]
mod common;

use assert_cmd::cargo::cargo_bin_cmd;
use common::TestFixture;
use predicates::prelude::*;

#[test]
fn test_compare_identical() {
    let fx = TestFixture::new();
    let a = fx.write_pattern("a.bin", 10_000);
    let b = fx.write_pattern("b.bin", 10_000);

    cargo_bin_cmd!("bcp")
        .arg("--compare")
        .arg(&a)
        .arg(&b)
        .assert()
        .success()
        .stdout(predicate::str::contains("identical"));
}

#[test]
fn test_compare_same_path() {
    let fx = TestFixture::new();
    let a = fx.write("a.txt", "same");

    cargo_bin_cmd!("bcp")
        .arg("--compare")
        .arg(&a)
        .arg(&a)
        .assert()
        .success();
}

#[test]
fn test_compare_different_length() {
    let fx = TestFixture::new();
    let a = fx.write("a.txt", "prefix");
    let b = fx.write("b.txt", "prefix and more");

    cargo_bin_cmd!("bcp")
        .arg("--compare")
        .arg(&a)
        .arg(&b)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("differ"))
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_compare_single_byte_difference() {
    let fx = TestFixture::new();
    let a = fx.write("a.bin", [0u8, 1, 2, 3, 4]);
    let b = fx.write("b.bin", [0u8, 1, 9, 3, 4]);

    cargo_bin_cmd!("bcp")
        .args(["--compare", "-q"])
        .arg(&a)
        .arg(&b)
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_compare_missing_file() {
    let fx = TestFixture::new();
    let a = fx.write("a.txt", "data");

    cargo_bin_cmd!("bcp")
        .arg("--compare")
        .arg(&a)
        .arg(fx.path("missing.txt"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error[not_found]"));
}

#[test]
fn test_compare_after_copy() {
    let fx = TestFixture::new();
    let src = fx.write_pattern("src.bin", 2048);
    let dst = fx.path("dst.bin");

    cargo_bin_cmd!("bcp")
        .args(["-s", "byte"])
        .arg(&src)
        .arg(&dst)
        .assert()
        .success();

    cargo_bin_cmd!("bcp")
        .arg("--compare")
        .arg(&src)
        .arg(&dst)
        .assert()
        .success();
}
