//! Collector provisioning: the installation state machine.
//!
//! `Provisioner::run` calls the stages in [`Stage`] declaration order. Each
//! stage only runs after the previous one succeeded; the first failure becomes a
//! [`ProvisionError`] naming the stage, and nothing later runs. There is no
//! rollback and no retry.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

pub mod activate;
pub mod artifact;
pub mod configure;
pub mod layout;
pub mod preflight;

use std::path::Path;

use anyhow::Context;

use crate::application::ports::{Confirm, HostSystem, Network, ProgressReporter, Storage};
use crate::domain::{InstallReport, InstallerConfig, ProvisionError, Stage, StepError};

pub use activate::ActivationPolicy;

/// Per-run choices that are not part of the installer configuration.
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    pub activation: ActivationPolicy,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            activation: ActivationPolicy::Ask,
        }
    }
}

/// Runs the installation sequence against injected host, storage, network,
/// and operator-interaction ports.
pub struct Provisioner<'a, H, F, N, U> {
    host: &'a H,
    fs: &'a F,
    net: &'a N,
    ui: &'a U,
    config: &'a InstallerConfig,
}

impl<'a, H, F, N, U> Provisioner<'a, H, F, N, U>
where
    H: HostSystem,
    F: Storage,
    N: Network,
    U: ProgressReporter + Confirm,
{
    #[must_use]
    pub fn new(host: &'a H, fs: &'a F, net: &'a N, ui: &'a U, config: &'a InstallerConfig) -> Self {
        Self {
            host,
            fs,
            net,
            ui,
            config,
        }
    }

    /// Run every stage once.
    ///
    /// # Errors
    ///
    /// Returns the first stage failure; later stages are not attempted.
    pub async fn run(&self, options: RunOptions) -> Result<InstallReport, ProvisionError> {
        let config = self.config;

        enter(Stage::Preflight);
        preflight::check(self.host, &config.host_packages, self.ui)
            .await
            .map_err(at(Stage::Preflight))?;

        enter(Stage::ArchDetect);
        let arch = preflight::detect_arch(self.host).map_err(at(Stage::ArchDetect))?;

        enter(Stage::Fetch);
        let archive = artifact::fetch(self.fs, self.net, config, arch, self.ui)
            .await
            .map_err(at(Stage::Fetch))?;

        enter(Stage::Install);
        let collector_version = artifact::install(self.host, self.fs, config, &archive, self.ui)
            .await
            .map_err(at(Stage::Install))?;

        enter(Stage::Directories);
        layout::ensure_directories(self.fs, &config.paths, self.ui)
            .map_err(at(Stage::Directories))?;

        enter(Stage::ServiceUnit);
        let unit = layout::write_unit(self.host, self.fs, config, self.ui)
            .await
            .map_err(at(Stage::ServiceUnit))?;

        enter(Stage::Configure);
        let hostname = configure::write_config(self.host, self.fs, self.net, config, self.ui)
            .await
            .map_err(at(Stage::Configure))?;

        enter(Stage::Validate);
        configure::validate(self.host, &config.paths, self.ui)
            .await
            .map_err(at(Stage::Validate))?;

        enter(Stage::Activate);
        let activation = activate::activate(
            self.host,
            self.ui,
            &unit,
            config.settle_delay(),
            options.activation,
        )
        .await
        .map_err(at(Stage::Activate))?;

        enter(Stage::Summary);
        Ok(InstallReport {
            version: config.version.trim_start_matches('v').to_string(),
            arch,
            collector_version,
            archive_sha256: archive.sha256,
            binary: config.paths.binary.clone(),
            config_file: config.paths.config_file.clone(),
            log_dir: config.paths.log_dir.clone(),
            unit_file: config.paths.unit_file.clone(),
            unit,
            backend_endpoint: config.backend_endpoint.clone(),
            hostname,
            activation,
            completed_at: chrono::Utc::now(),
        })
    }
}

fn enter(stage: Stage) {
    tracing::info!(%stage, "entering stage");
}

fn at(stage: Stage) -> impl Fn(StepError) -> ProvisionError {
    move |cause| {
        tracing::error!(%stage, error = %cause, "stage failed");
        ProvisionError::new(stage, cause)
    }
}

/// Paths are passed to external programs as strings.
pub(crate) fn utf8(path: &Path) -> anyhow::Result<&str> {
    path.to_str()
        .with_context(|| format!("path is not valid UTF-8: {}", path.display()))
}
