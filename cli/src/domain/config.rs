//! Domain types and validators for installer configuration.
//!
//! Pure functions only: no I/O, no async, no filesystem access.

use std::path::PathBuf;
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

pub const DEFAULT_VERSION: &str = "0.115.1";
pub const DEFAULT_BINARY_NAME: &str = "otelcol-contrib";
pub const DEFAULT_RELEASE_URL: &str = "https://github.com/open-telemetry/opentelemetry-collector-releases/releases/download/v{version}/otelcol-contrib_{version}_linux_{arch}.tar.gz";
pub const DEFAULT_CONFIG_TEMPLATE_URL: &str =
    "https://raw.githubusercontent.com/example-org/telemetry-config/main/otelcol/config.yaml";
pub const DEFAULT_BACKEND_ENDPOINT: &str = "https://otlp.example.com:4318";
pub const DEFAULT_SERVICE_NAME: &str = "my-service";

static SERVICE_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)] // compile-time constant pattern
    Regex::new(r"^[a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?$").expect("valid regex")
});

// ── Config schema ────────────────────────────────────────────────────────────

/// Everything a provisioning run needs, injected at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallerConfig {
    /// Collector release version, without a leading `v`.
    pub version: String,
    /// Name of the executable inside the release archive.
    pub binary_name: String,
    /// Archive URL template; `{version}` and `{arch}` are expanded.
    pub release_url: String,
    /// Where the YAML configuration template is fetched from.
    pub config_template_url: String,
    /// Replaces `PLACEHOLDER_ENDPOINT` in the template.
    pub backend_endpoint: String,
    /// Prefix of the derived hostname.
    pub service_name: String,
    /// `Description=` line of the systemd unit.
    pub description: String,
    /// Host utilities installed through the package manager when missing.
    pub host_packages: Vec<String>,
    pub paths: InstallPaths,
    pub metadata: MetadataConfig,
    pub download_timeout_secs: u64,
    /// Pause between `systemctl restart` and the single `is-active` check.
    pub settle_delay_ms: u64,
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            version: DEFAULT_VERSION.to_string(),
            binary_name: DEFAULT_BINARY_NAME.to_string(),
            release_url: DEFAULT_RELEASE_URL.to_string(),
            config_template_url: DEFAULT_CONFIG_TEMPLATE_URL.to_string(),
            backend_endpoint: DEFAULT_BACKEND_ENDPOINT.to_string(),
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            description: "OpenTelemetry Collector".to_string(),
            host_packages: vec!["curl".to_string(), "tar".to_string()],
            paths: InstallPaths::default(),
            metadata: MetadataConfig::default(),
            download_timeout_secs: 300,
            settle_delay_ms: 3000,
        }
    }
}

/// Fixed host paths the installer writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallPaths {
    pub binary: PathBuf,
    pub config_dir: PathBuf,
    pub config_file: PathBuf,
    pub log_dir: PathBuf,
    pub unit_file: PathBuf,
    /// Scratch directory for the downloaded archive.
    pub work_dir: PathBuf,
}

impl Default for InstallPaths {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("/usr/local/bin/otelcol-contrib"),
            config_dir: PathBuf::from("/etc/otelcol-contrib"),
            config_file: PathBuf::from("/etc/otelcol-contrib/config.yaml"),
            log_dir: PathBuf::from("/var/log/otelcol-contrib"),
            unit_file: PathBuf::from("/etc/systemd/system/otelcol-contrib.service"),
            work_dir: PathBuf::from("/tmp"),
        }
    }
}

impl InstallPaths {
    /// Re-root every path under `root`. Used to run the flow in a sandbox.
    #[must_use]
    pub fn rooted_at(&self, root: &std::path::Path) -> Self {
        let under = |p: &PathBuf| root.join(p.strip_prefix("/").unwrap_or(p));
        Self {
            binary: under(&self.binary),
            config_dir: under(&self.config_dir),
            config_file: under(&self.config_file),
            log_dir: under(&self.log_dir),
            unit_file: under(&self.unit_file),
            work_dir: under(&self.work_dir),
        }
    }
}

/// Cloud instance-metadata probe settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataConfig {
    pub endpoint: String,
    pub timeout_ms: u64,
    pub token_ttl_secs: u64,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://169.254.169.254".to_string(),
            timeout_ms: 2000,
            token_ttl_secs: 21600,
        }
    }
}

impl MetadataConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl InstallerConfig {
    #[must_use]
    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.download_timeout_secs)
    }

    #[must_use]
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    /// Apply environment overrides on top of file/default values.
    pub fn apply_overrides(&mut self, overrides: EnvOverrides) {
        if let Some(v) = overrides.version {
            self.version = v;
        }
        if let Some(v) = overrides.config_template_url {
            self.config_template_url = v;
        }
        if let Some(v) = overrides.backend_endpoint {
            self.backend_endpoint = v;
        }
        if let Some(v) = overrides.service_name {
            self.service_name = v;
        }
    }

    /// Validate the merged configuration.
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError` found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let version = self.version.trim_start_matches('v');
        semver::Version::parse(version)
            .map_err(|_| ConfigError::InvalidVersion(self.version.clone()))?;

        if self.binary_name.trim().is_empty() {
            return Err(ConfigError::EmptyField("binary_name"));
        }
        if self.backend_endpoint.trim().is_empty() {
            return Err(ConfigError::EmptyField("backend_endpoint"));
        }
        if !SERVICE_NAME_RE.is_match(&self.service_name) {
            return Err(ConfigError::InvalidServiceName(self.service_name.clone()));
        }

        validate_download_url("release_url", &self.release_url)?;
        if !self.release_url.contains("{version}") || !self.release_url.contains("{arch}") {
            return Err(ConfigError::MissingArchPlaceholder(self.release_url.clone()));
        }
        validate_download_url("config_template_url", &self.config_template_url)?;

        if self.metadata.endpoint.trim().is_empty() {
            return Err(ConfigError::EmptyField("metadata.endpoint"));
        }
        Ok(())
    }
}

/// Values taken from `COLLECTOR_INSTALLER_*` environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnvOverrides {
    pub version: Option<String>,
    pub config_template_url: Option<String>,
    pub backend_endpoint: Option<String>,
    pub service_name: Option<String>,
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Downloads must be HTTPS; plain HTTP is accepted only for loopback hosts.
fn validate_download_url(field: &'static str, url: &str) -> Result<(), ConfigError> {
    let invalid = || ConfigError::InvalidUrl {
        field,
        value: url.to_string(),
    };
    if let Some(rest) = url.strip_prefix("https://") {
        return if rest.is_empty() { Err(invalid()) } else { Ok(()) };
    }
    let rest = url.strip_prefix("http://").ok_or_else(invalid)?;
    let host = rest.split(['/', '?']).next().unwrap_or_default();
    let host = host.rsplit_once(':').map_or(host, |(h, port)| {
        if port.chars().all(|c| c.is_ascii_digit()) { h } else { host }
    });
    if matches!(host, "localhost" | "127.0.0.1" | "[::1]") {
        Ok(())
    } else {
        Err(invalid())
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
