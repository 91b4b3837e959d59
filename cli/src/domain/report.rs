//! Result of a successful provisioning run.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::arch::Arch;
use crate::domain::hostname::ResolvedHostname;

/// Whether the service was started at the end of the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    Started,
    Declined,
}

/// Values printed by the summary.
#[derive(Debug, Clone, Serialize)]
pub struct InstallReport {
    pub version: String,
    pub arch: Arch,
    /// First line of `<binary> --version`.
    pub collector_version: String,
    pub archive_sha256: String,
    pub binary: PathBuf,
    pub config_file: PathBuf,
    pub log_dir: PathBuf,
    pub unit_file: PathBuf,
    pub unit: String,
    pub backend_endpoint: String,
    pub hostname: ResolvedHostname,
    pub activation: Activation,
    pub completed_at: DateTime<Utc>,
}
