//! Basic functionality integration tests for bcp CLI.

#[path = "../common/mod.rs"]
mod common;

use assert_cmd::cargo::cargo_bin_cmd;
use common::{TestFixture, pattern};
use predicates::prelude::*;
use rstest::rstest;

#[test]
fn test_default_whole_copy() {
    let fx = TestFixture::new();
    let src = fx.write("src.txt", "hello world");
    let dst = fx.path("dst.txt");

    cargo_bin_cmd!("bcp")
        .arg(&src)
        .arg(&dst)
        .assert()
        .success()
        .stdout(predicate::str::contains("Copied 11 B (whole)"));

    fx.assert_bytes(&dst, "hello world");
}

#[rstest]
#[case("whole")]
#[case("buffered")]
#[case("staged")]
#[case("byte")]
#[case("staged-byte")]
#[case("block")]
fn test_byte_exact_strategies(#[case] strategy: &str) {
    let fx = TestFixture::new();
    let src = fx.write_pattern("src.bin", 3000);
    let dst = fx.path("dst.bin");

    cargo_bin_cmd!("bcp")
        .args(["--strategy", strategy, "--verify"])
        .arg(&src)
        .arg(&dst)
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("({strategy})")));

    fx.assert_bytes(&dst, pattern(3000));
}

#[test]
fn test_block_copy_exact_multiple() {
    let fx = TestFixture::new();
    let src = fx.write_pattern("src.bin", 4096);
    let dst = fx.path("dst.bin");

    cargo_bin_cmd!("bcp")
        .args(["-s", "block", "-b", "1024", "-q"])
        .arg(&src)
        .arg(&dst)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    fx.assert_bytes(&dst, pattern(4096));
}

#[test]
fn test_lines_copy_reports_lines() {
    let fx = TestFixture::new();
    let src = fx.write("src.txt", "alpha\r\nbeta\r\ngamma");
    let dst = fx.path("dst.txt");

    cargo_bin_cmd!("bcp")
        .args(["-s", "lines", "--line-ending", "lf"])
        .arg(&src)
        .arg(&dst)
        .assert()
        .success()
        .stdout(predicate::str::contains("Copied 3 lines (lines)"));

    fx.assert_bytes(&dst, "alpha\nbeta\ngamma\n");
}

#[test]
fn test_lines_copy_with_legacy_encoding() {
    let fx = TestFixture::new();
    let data: &[u8] = b"Stra\xDFe\r\n";
    let src = fx.write("latin.txt", data);
    let dst = fx.path("dst.txt");

    cargo_bin_cmd!("bcp")
        .args(["-s", "lines", "-e", "latin1", "--line-ending", "crlf"])
        .arg(&src)
        .arg(&dst)
        .assert()
        .success();

    fx.assert_bytes(&dst, data);
}

#[test]
fn test_staged_text_copy() {
    let fx = TestFixture::new();
    let src = fx.write("src.txt", "plain ascii text");
    let dst = fx.path("dst.txt");

    cargo_bin_cmd!("bcp")
        .args(["-s", "staged-text"])
        .arg(&src)
        .arg(&dst)
        .assert()
        .success();

    fx.assert_bytes(&dst, "plain ascii text");
}

#[test]
fn test_copy_overwrites_longer_destination() {
    let fx = TestFixture::new();
    let src = fx.write("src.txt", "new");
    let dst = fx.write("dst.txt", "old content that is longer");

    cargo_bin_cmd!("bcp").arg(&src).arg(&dst).assert().success();

    fx.assert_bytes(&dst, "new");
}

#[test]
fn test_verbose_summary() {
    let fx = TestFixture::new();
    let src = fx.write_pattern("src.bin", 100);
    let dst = fx.path("dst.bin");

    cargo_bin_cmd!("bcp")
        .args(["-v", "-s", "block", "-b", "16", "--verify", "--sync"])
        .arg(&src)
        .arg(&dst)
        .assert()
        .success()
        .stdout(predicate::str::contains("Copied:       100 bytes"))
        .stdout(predicate::str::contains("Block size:   16"))
        .stdout(predicate::str::contains("Verified:     identical"));
}
