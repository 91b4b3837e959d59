//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

use crate::domain::stage::Stage;

// ── Step errors ───────────────────────────────────────────────────────────────

/// Why a single provisioning stage failed.
#[derive(Debug, Error)]
pub enum StepError {
    #[error("must be run as root (try: sudo collector-installer)")]
    Privilege,

    #[error("could not install required packages [{}]: {reason}", packages.join(", "))]
    DependencyRepair {
        packages: Vec<String>,
        reason: String,
    },

    #[error("systemd is not available on this host (systemctl not found)")]
    ServiceManagerMissing,

    #[error("unsupported architecture: {0} (supported: x86_64, aarch64)")]
    UnsupportedPlatform(String),

    #[error("download of {url} failed: {reason}")]
    Fetch { url: String, reason: String },

    #[error("collector artifact is broken: {0}")]
    ArtifactIntegrity(String),

    #[error("collector rejected the configuration:\n{output}")]
    ConfigValidation { output: String },

    #[error("{unit} did not become active. Check: journalctl -u {unit}")]
    Activation { unit: String },

    #[error(transparent)]
    Io(#[from] anyhow::Error),
}

// ── Provision error ───────────────────────────────────────────────────────────

/// A failed run: the stage it stopped at and why.
#[derive(Debug, Error)]
#[error("{stage} failed: {cause}")]
pub struct ProvisionError {
    pub stage: Stage,
    #[source]
    pub cause: StepError,
}

impl ProvisionError {
    #[must_use]
    pub fn new(stage: Stage, cause: StepError) -> Self {
        Self { stage, cause }
    }

    /// Short machine-readable code for `--json` error output.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self.cause {
            StepError::Privilege => "privilege",
            StepError::DependencyRepair { .. } => "dependency_repair",
            StepError::ServiceManagerMissing => "service_manager_missing",
            StepError::UnsupportedPlatform(_) => "unsupported_platform",
            StepError::Fetch { .. } => "fetch",
            StepError::ArtifactIntegrity(_) => "artifact_integrity",
            StepError::ConfigValidation { .. } => "config_validation",
            StepError::Activation { .. } => "activation",
            StepError::Io(_) => "io",
        }
    }
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors raised while validating an `InstallerConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid version '{0}': expected semver like 0.115.1")]
    InvalidVersion(String),

    #[error("Invalid URL for {field}: {value}")]
    InvalidUrl { field: &'static str, value: String },

    #[error("Invalid service name '{0}': must match ^[a-z0-9]([a-z0-9-]{{0,61}}[a-z0-9])?$")]
    InvalidServiceName(String),

    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    #[error("release_url must contain {{version}} and {{arch}}: {0}")]
    MissingArchPlaceholder(String),
}
