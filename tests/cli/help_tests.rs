use crate::common::cmd;
use predicates::prelude::*;

#[test]
fn test_help_flag() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("callmap"))
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_run_help() {
    cmd()
        .args(["run", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--scenario"))
        .stdout(predicate::str::contains("--prevent-parent-calls"))
        .stdout(predicate::str::contains("--show-ledger"));
}

#[test]
fn test_check_help() {
    cmd()
        .args(["check", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Validate"));
}

#[test]
fn test_no_subcommand_fails() {
    cmd().assert().failure().stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_completions_for_bash() {
    cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("callmap"));
}
