//! CLI surface tests: argument parsing and early exit codes.

use assert_cmd::Command;
use predicates::prelude::*;

fn svckit() -> Command {
    Command::cargo_bin("svckit").expect("binary should build")
}

#[test]
fn test_help_lists_subcommands() {
    svckit()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("start"))
        .stdout(predicate::str::contains("deploy"))
        .stdout(predicate::str::contains("stop"));
}

#[test]
fn test_start_help_shows_simulator_flags() {
    svckit()
        .args(["start", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--no-simulator"))
        .stdout(predicate::str::contains("--prompt-simulator"));
}

#[test]
fn test_simulator_flags_conflict() {
    svckit()
        .args(["start", "--no-simulator", "--prompt-simulator"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_missing_subcommand_fails() {
    svckit().assert().failure();
}

#[test]
fn test_start_rejects_invalid_config() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    std::fs::write(dir.path().join("svckit.toml"), "[backend\nport =").expect("write config");

    svckit()
        .args(["start", "--no-simulator"])
        .arg("--root")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("parse"));
}
