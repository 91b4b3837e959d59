//! Unit tests for configuration loading through the real `YamlConfigStore`.
//!
//! These tests mutate `COLLECTOR_INSTALLER_*` environment variables, so each
//! one is `#[serial]`.

#![allow(clippy::expect_used, clippy::unwrap_used, unsafe_code)]

use collector_installer::application::services::config_service::load_config;
use collector_installer::domain::InstallerConfig;
use collector_installer::infra::config::YamlConfigStore;
use serial_test::serial;
use tempfile::TempDir;

const OVERRIDE_VARS: [&str; 4] = [
    "COLLECTOR_INSTALLER_VERSION",
    "COLLECTOR_INSTALLER_CONFIG_TEMPLATE_URL",
    "COLLECTOR_INSTALLER_BACKEND_ENDPOINT",
    "COLLECTOR_INSTALLER_SERVICE_NAME",
];

fn clear_overrides() {
    for var in OVERRIDE_VARS {
        // SAFETY: every test touching these variables is #[serial].
        unsafe { std::env::remove_var(var) };
    }
}

fn write_config(yaml: &str) -> (TempDir, YamlConfigStore) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("installer.yaml");
    std::fs::write(&path, yaml).expect("write config");
    (dir, YamlConfigStore::new(Some(path)))
}

#[test]
#[serial]
fn test_defaults_when_nothing_configured() {
    clear_overrides();
    let config = load_config(&YamlConfigStore::new(None)).expect("load");
    assert_eq!(config, InstallerConfig::default());
}

#[test]
#[serial]
fn test_env_override_beats_file() {
    clear_overrides();
    let (_dir, store) = write_config("service_name: from-file\nversion: 0.120.0\n");
    // SAFETY: #[serial].
    unsafe { std::env::set_var("COLLECTOR_INSTALLER_SERVICE_NAME", "from-env") };

    let config = load_config(&store).expect("load");
    clear_overrides();

    assert_eq!(config.service_name, "from-env");
    assert_eq!(config.version, "0.120.0");
}

#[test]
#[serial]
fn test_invalid_override_is_rejected() {
    clear_overrides();
    // SAFETY: #[serial].
    unsafe { std::env::set_var("COLLECTOR_INSTALLER_VERSION", "latest") };

    let err = load_config(&YamlConfigStore::new(None)).unwrap_err();
    clear_overrides();

    assert!(format!("{err:#}").contains("Invalid version"), "got: {err:#}");
}

#[test]
#[serial]
fn test_file_with_plain_http_endpoint_is_rejected() {
    clear_overrides();
    let (_dir, store) = write_config("config_template_url: http://config.example.com/c.yaml\n");
    let err = load_config(&store).unwrap_err();
    assert!(format!("{err:#}").contains("config_template_url"), "got: {err:#}");
}
