//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`, never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::Duration;

use anyhow::Result;

use crate::domain::{EnvOverrides, InstallerConfig};

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output>;
}

// ── Host Ports ────────────────────────────────────────────────────────────────

/// Facts about the machine the installer runs on.
pub trait HostInfo {
    /// Whether the process has root privileges.
    fn is_privileged(&self) -> bool;
    /// CPU identifier as reported by `uname -m`.
    fn machine(&self) -> Result<String>;
    /// The host's own name.
    fn hostname(&self) -> Result<String>;
}

/// Host package manager: presence checks and installs.
#[allow(async_fn_in_trait)]
pub trait PackageManager {
    /// Whether `tool` resolves on `PATH`.
    async fn has_tool(&self, tool: &str) -> Result<bool>;
    /// Install all `packages` in one transaction.
    async fn install(&self, packages: &[String]) -> Result<()>;
}

/// Host service manager (systemd).
#[allow(async_fn_in_trait)]
pub trait ServiceManager {
    /// Whether the service manager can be driven on this host.
    async fn is_present(&self) -> bool;
    /// Reload unit definitions after a unit file changed.
    async fn daemon_reload(&self) -> Result<()>;
    /// Enable the unit on boot.
    async fn enable(&self, unit: &str) -> Result<()>;
    /// (Re)start the unit now so it runs the installed binary and config.
    /// An inactive unit is started.
    async fn restart(&self, unit: &str) -> Result<()>;
    /// Whether the unit is currently active.
    async fn is_active(&self, unit: &str) -> Result<bool>;
    /// The last `lines` journal entries of the unit.
    async fn recent_logs(&self, unit: &str, lines: u32) -> Result<String>;
    /// Human-readable status block.
    async fn status(&self, unit: &str) -> Result<String>;
}

/// Composite trait: everything the provisioner drives through processes.
pub trait HostSystem: CommandRunner + HostInfo + PackageManager + ServiceManager {}

impl<T> HostSystem for T where T: CommandRunner + HostInfo + PackageManager + ServiceManager {}

// ── Filesystem Ports ──────────────────────────────────────────────────────────

/// Raw filesystem operations on fixed host paths.
pub trait LocalFs {
    fn exists(&self, path: &Path) -> bool;
    /// Size of a regular file, or `None` when it does not exist.
    fn file_size(&self, path: &Path) -> Option<u64>;
    /// Create a directory and its parents. Existing directories are not an error.
    fn create_dir_all(&self, path: &Path) -> Result<()>;
    fn remove_file(&self, path: &Path) -> Result<()>;
    fn write(&self, path: &Path, content: &str) -> Result<()>;
    fn read_to_string(&self, path: &Path) -> Result<String>;
    /// Move `from` to `to`, replacing `to`, across filesystems if needed.
    fn move_file(&self, from: &Path, to: &Path) -> Result<()>;
    fn set_permissions(&self, path: &Path, mode: u32) -> Result<()>;
    /// SHA-256 hex digest of a file.
    fn sha256_file(&self, path: &Path) -> Result<String>;
    /// Fresh uniquely named directory under `parent`, removed when dropped.
    fn scratch_dir(&self, parent: &Path, prefix: &str) -> Result<tempfile::TempDir>;
}

/// Release archive extraction.
#[allow(async_fn_in_trait)]
pub trait ArchiveUnpacker {
    /// Unpack a `.tar.gz` archive into `dest`, which must exist.
    async fn unpack(&self, archive: &Path, dest: &Path) -> Result<()>;
}

/// Composite trait: filesystem plus archive handling.
pub trait Storage: LocalFs + ArchiveUnpacker {}

impl<T> Storage for T where T: LocalFs + ArchiveUnpacker {}

// ── Network Ports ─────────────────────────────────────────────────────────────

/// Plain HTTP(S) downloads.
#[allow(async_fn_in_trait)]
pub trait HttpFetcher {
    /// Download `url` into `dest`, returning the number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns an error on any non-2xx status, transport failure, or timeout.
    async fn download(&self, url: &str, dest: &Path, timeout: Duration) -> Result<u64>;
}

/// Cloud instance-metadata service.
#[allow(async_fn_in_trait)]
pub trait InstanceMetadata {
    /// Instance identifier, or `None` when no metadata service answers.
    ///
    /// # Errors
    ///
    /// Returns an error when the service answered the token request but the
    /// identifier query failed.
    async fn instance_id(&self) -> Result<Option<String>>;
}

/// Composite trait: all network collaborators.
pub trait Network: HttpFetcher + InstanceMetadata {}

impl<T> Network for T where T: HttpFetcher + InstanceMetadata {}

// ── Configuration Port ────────────────────────────────────────────────────────

/// Abstracts where installer configuration comes from.
pub trait ConfigStore {
    /// Load the file configuration, or defaults when no file exists.
    fn load(&self) -> Result<InstallerConfig>;
    /// Path of the configuration file, if one is in use.
    fn path(&self) -> Option<PathBuf>;
    /// Overrides from the process environment.
    fn overrides(&self) -> Result<EnvOverrides>;
}

// ── Interaction Ports ─────────────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait, no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
    /// Emit a verbatim block such as command output.
    fn detail(&self, text: &str);
}

/// Yes/no confirmation from the operator.
pub trait Confirm {
    /// Ask `prompt`; `default` is the answer on Enter or when non-interactive.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal prompt fails (e.g. no TTY available).
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool>;
}
