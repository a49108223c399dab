//! Smoke tests for the groupsync binary

use assert_cmd::Command;
use predicates::prelude::*;

fn groupsync() -> Command {
    Command::cargo_bin("groupsync").unwrap()
}

#[test]
fn test_help_lists_options() {
    groupsync()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--region"))
        .stdout(predicate::str::contains("--api-key"))
        .stdout(predicate::str::contains("--dry-run"));
}

#[test]
fn test_version() {
    groupsync()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_unreachable_api_exits_with_failure() {
    groupsync()
        .args([
            "--region",
            "us-1",
            "--api-key",
            "key",
            "--base-url",
            "http://127.0.0.1:9",
        ])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Exiting..."));
}

#[test]
fn test_piped_credentials_are_prompted_in_order() {
    groupsync()
        .args(["--base-url", "http://127.0.0.1:9"])
        .write_stdin("us-1\nkey\n")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Enter your region: "))
        .stdout(predicate::str::contains("Enter your C1 API key: "))
        .stdout(predicate::str::contains("Exiting..."));
}

#[test]
fn test_missing_input_is_an_error() {
    groupsync()
        .args(["--base-url", "http://127.0.0.1:9"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("end of input"));
}
