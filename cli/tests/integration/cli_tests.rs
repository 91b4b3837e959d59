//! Integration tests for the collector-installer binary
//!
//! These tests verify argument parsing, the read-only commands, and that
//! invalid configuration stops `install` before any host change.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn installer() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("collector-installer"));
    cmd.env("NO_COLOR", "1");
    for var in [
        "COLLECTOR_INSTALLER_CONFIG",
        "COLLECTOR_INSTALLER_VERSION",
        "COLLECTOR_INSTALLER_CONFIG_TEMPLATE_URL",
        "COLLECTOR_INSTALLER_BACKEND_ENDPOINT",
        "COLLECTOR_INSTALLER_SERVICE_NAME",
        "COLLECTOR_INSTALLER_YES",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

fn config_file(yaml: &str) -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("installer.yaml");
    std::fs::write(&path, yaml).expect("write config");
    (dir, path)
}

// --- Help and version tests ---

#[test]
fn test_cli_help_flag_shows_help() {
    installer()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("install"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_install_help_lists_flags() {
    installer()
        .args(["install", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--yes"))
        .stdout(predicate::str::contains("--no-start"));
}

#[test]
fn test_cli_version_flag_shows_version() {
    installer()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("collector-installer"));
}

#[test]
fn test_version_command_shows_version() {
    installer()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("collector-installer 0.1.0"));
}

#[test]
fn test_version_command_json_outputs_valid_json() {
    let output = installer()
        .args(["version", "--json"])
        .output()
        .expect("run");
    assert!(output.status.success());
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(v["version"], "0.1.0");
}

// --- Config command tests ---

#[test]
fn test_config_without_file_shows_defaults() {
    installer()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("built-in defaults"))
        .stdout(predicate::str::contains("binary_name: otelcol-contrib"))
        .stdout(predicate::str::contains("service_name: my-service"));
}

#[test]
fn test_config_reads_file_given_by_flag() {
    let (_dir, path) = config_file("service_name: payments\nversion: 0.120.0\n");
    installer()
        .arg("config")
        .arg("--config")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("service_name: payments"))
        .stdout(predicate::str::contains("0.120.0"));
}

#[test]
fn test_config_reads_file_given_by_env() {
    let (_dir, path) = config_file("service_name: inventory\n");
    installer()
        .env("COLLECTOR_INSTALLER_CONFIG", &path)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("service_name: inventory"));
}

#[test]
fn test_env_override_beats_file() {
    let (_dir, path) = config_file("service_name: from-file\n");
    let output = installer()
        .env("COLLECTOR_INSTALLER_SERVICE_NAME", "from-env")
        .args(["config", "--json", "--config"])
        .arg(&path)
        .output()
        .expect("run");
    assert!(output.status.success());
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(v["config"]["service_name"], "from-env");
    assert_eq!(v["loaded_from_file"], true);
}

#[test]
fn test_config_missing_file_falls_back_to_defaults() {
    installer()
        .args(["config", "--config", "/nonexistent/installer.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not found, using defaults"));
}

#[test]
fn test_config_malformed_file_exits_one() {
    let (_dir, path) = config_file("paths: [1, 2]\n");
    installer()
        .arg("config")
        .arg("--config")
        .arg(&path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error: cannot parse"));
}

// --- Install guard rails (never reach the host) ---

#[test]
fn test_install_with_invalid_version_exits_one() {
    installer()
        .env("COLLECTOR_INSTALLER_VERSION", "latest")
        .args(["install", "--no-start"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid installer configuration"))
        .stderr(predicate::str::contains("Invalid version 'latest'"));
}

#[test]
fn test_bare_invocation_runs_install_and_validates_config_first() {
    installer()
        .env("COLLECTOR_INSTALLER_SERVICE_NAME", "Not_A_Label")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid service name"));
}

#[test]
fn test_install_json_error_is_structured() {
    let (_dir, path) =
        config_file("config_template_url: http://config.example.com/otelcol.yaml\n");
    let output = installer()
        .args(["--json", "install", "--config"])
        .arg(&path)
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(1));
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(v["error"], true);
    assert_eq!(v["code"], "error");
    assert!(
        v["message"]
            .as_str()
            .is_some_and(|m| m.contains("config_template_url"))
    );
}

#[test]
fn test_yes_and_no_start_conflict() {
    installer()
        .args(["install", "--yes", "--no-start"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cannot be used with"));
}

// --- Error handling tests ---

#[test]
fn test_unknown_command_exits_with_error() {
    installer()
        .arg("nonexistent")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}
