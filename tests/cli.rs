//! Integration tests for Snippy.
//!
//! These run the real binary against a throwaway `SNIPPY_HOME`.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get a command for running snippy with its data folder inside `home`.
fn snippy(home: &TempDir) -> Command {
    let mut command = Command::cargo_bin("snippy").unwrap();
    command.env("SNIPPY_HOME", home.path()).env_remove("RUST_LOG");
    command
}

#[test]
fn help_flag_works() {
    let home = TempDir::new().unwrap();

    snippy(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Templatize your git commit messages"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn reset_writes_default_config() {
    let home = TempDir::new().unwrap();
    let config_path = home.path().join(".snippy").join("config.json");

    snippy(&home)
        .arg("reset")
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration reset to defaults."));

    let content = fs::read_to_string(config_path).unwrap();
    assert!(content.contains("\"commit_template\": \"<type>: <emoji> <subject>\""));
    assert!(content.contains("    \"include_emoji\": true"));
}

#[test]
fn reset_overwrites_customized_config() {
    let home = TempDir::new().unwrap();
    let data_dir = home.path().join(".snippy");
    fs::create_dir_all(&data_dir).unwrap();
    fs::write(
        data_dir.join("config.json"),
        r#"{"commit_template": "<subject>", "include_type": false, "include_emoji": false}"#,
    )
    .unwrap();

    snippy(&home).arg("reset").assert().success();

    let content = fs::read_to_string(data_dir.join("config.json")).unwrap();
    assert!(content.contains("<type>: <emoji> <subject>"));
    assert!(content.contains("\"chore\""));
}

#[test]
fn version_flag_reads_cache() {
    let home = TempDir::new().unwrap();
    let data_dir = home.path().join(".snippy");
    fs::create_dir_all(&data_dir).unwrap();
    fs::write(
        data_dir.join("installed_version.json"),
        r#"{"version": "0.2.1", "checked_at": "2026-01-01T00:00:00Z"}"#,
    )
    .unwrap();

    snippy(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("snippy 0.2.1"));
}

#[test]
fn corrupt_config_is_fatal_and_left_untouched() {
    let home = TempDir::new().unwrap();
    let data_dir = home.path().join(".snippy");
    fs::create_dir_all(&data_dir).unwrap();
    fs::write(data_dir.join("config.json"), "{ not json").unwrap();

    snippy(&home)
        .arg("config")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("malformed"));

    assert_eq!(
        fs::read_to_string(data_dir.join("config.json")).unwrap(),
        "{ not json"
    );
}

#[test]
fn commit_outside_repository_fails() {
    let home = TempDir::new().unwrap();
    let work_dir = TempDir::new().unwrap();

    snippy(&home)
        .current_dir(work_dir.path())
        .env(
            "GIT_CEILING_DIRECTORIES",
            work_dir.path().parent().unwrap_or(work_dir.path()),
        )
        .assert()
        .code(1);
}

#[test]
fn completion_script_is_generated() {
    let home = TempDir::new().unwrap();

    snippy(&home)
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("snippy"));
}

#[test]
fn unknown_subcommand_is_rejected() {
    let home = TempDir::new().unwrap();

    snippy(&home).arg("deploy").assert().failure();
}
