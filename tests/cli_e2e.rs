//! End-to-end tests for the vidgrab binary: argument surface and fast
//! failure paths that need no network.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_describes_the_tool() {
    Command::cargo_bin("vidgrab")
        .expect("binary builds")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("video links"))
        .stdout(predicate::str::contains("--output-dir"))
        .stdout(predicate::str::contains("--concurrency"));
}

#[test]
fn test_missing_url_is_a_usage_error() {
    Command::cargo_bin("vidgrab")
        .expect("binary builds")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_out_of_range_concurrency_is_rejected() {
    Command::cargo_bin("vidgrab")
        .expect("binary builds")
        .args(["http://example.com", "--concurrency", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_out_of_range_chunk_size_is_rejected() {
    Command::cargo_bin("vidgrab")
        .expect("binary builds")
        .args(["http://example.com", "--chunk-size", "7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_unparseable_page_url_fails_fast() {
    Command::cargo_bin("vidgrab")
        .expect("binary builds")
        .args(["not a url", "--quiet"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid page URL"));
}
