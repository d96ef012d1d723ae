//! Integration tests for the `failwright` binary entry point.
//!
//! Verifies the version report, user-facing error handling, and that the
//! binary rewrites sources in place.

use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::str::contains;
use tempfile::TempDir;

#[test]
fn version_report_succeeds() {
    let mut command = cargo_bin_cmd!("failwright");
    command.arg("--version");
    command
        .assert()
        .success()
        .stdout(contains("failwright Version:"))
        .stdout(contains("OS/Arch:"));
}

#[test]
fn missing_command_exits_with_failure() {
    let mut command = cargo_bin_cmd!("failwright");
    command
        .assert()
        .failure()
        .code(1)
        .stderr(contains("a command is required"));
}

#[test]
fn enable_writes_companion_next_to_source() {
    let dir = TempDir::new().expect("create temp dir");
    fs::write(
        dir.path().join("io.rs"),
        "fn read() {\n    // failpoint: var short_read usize\n    //return;\n}\n",
    )
    .expect("write source");

    let mut command = cargo_bin_cmd!("failwright");
    command.current_dir(dir.path()).arg("enable");
    command.assert().success().stdout("");

    let companion = fs::read_to_string(dir.path().join("io.fail.rs")).expect("read companion");
    assert!(companion.contains("::io::short_read\", \"usize\""));
}

#[test]
fn missing_path_is_reported() {
    let dir = TempDir::new().expect("create temp dir");
    let mut command = cargo_bin_cmd!("failwright");
    command.current_dir(dir.path()).args(["disable", "nowhere.rs"]);
    command
        .assert()
        .failure()
        .stderr(contains("does not exist"));
}

#[test]
fn invalid_configuration_is_reported() {
    let dir = TempDir::new().expect("create temp dir");
    let mut command = cargo_bin_cmd!("failwright");
    command
        .current_dir(dir.path())
        .args(["--log-format", "bogus", "enable"]);
    command
        .assert()
        .failure()
        .stderr(contains("failed to load configuration"));
}
