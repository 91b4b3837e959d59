//! Host directories and the systemd unit. Both steps are safe to repeat.

use crate::application::ports::{LocalFs, ProgressReporter, ServiceManager};
use crate::domain::unit::{render_unit, unit_name};
use crate::domain::{InstallPaths, InstallerConfig, StepError};

/// Ensure the configuration and log directories exist.
///
/// # Errors
///
/// Returns an error only if a directory cannot be created.
pub fn ensure_directories(
    fs: &impl LocalFs,
    paths: &InstallPaths,
    reporter: &impl ProgressReporter,
) -> Result<(), StepError> {
    for dir in [&paths.config_dir, &paths.log_dir] {
        fs.create_dir_all(dir)?;
        tracing::debug!(dir = %dir.display(), "directory ensured");
    }
    reporter.success("directories ready");
    Ok(())
}

/// Write the unit file unconditionally and reload systemd.
///
/// Returns the unit name for later `systemctl` calls.
///
/// # Errors
///
/// Returns an error if the write or the reload fails.
pub async fn write_unit(
    services: &impl ServiceManager,
    fs: &impl LocalFs,
    config: &InstallerConfig,
    reporter: &impl ProgressReporter,
) -> Result<String, StepError> {
    let paths = &config.paths;
    let content = render_unit(&config.description, &paths.binary, &paths.config_file);
    if let Some(parent) = paths.unit_file.parent() {
        fs.create_dir_all(parent)?;
    }
    fs.write(&paths.unit_file, &content)?;
    services.daemon_reload().await?;

    let unit = unit_name(&paths.unit_file);
    tracing::info!(%unit, path = %paths.unit_file.display(), "service unit written");
    reporter.success(&format!("service unit {unit} written"));
    Ok(unit)
}
