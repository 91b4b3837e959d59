//! Preflight and architecture detection.

use crate::application::ports::{HostInfo, PackageManager, ProgressReporter, ServiceManager};
use crate::domain::{Arch, StepError};

/// Require root, repair missing host packages, and require systemd.
///
/// Missing packages are installed in one package-manager call; only a failed
/// install is an error.
///
/// # Errors
///
/// `Privilege` when not root, `DependencyRepair` when the install fails,
/// `ServiceManagerMissing` when `systemctl` cannot be used.
pub async fn check(
    host: &(impl HostInfo + PackageManager + ServiceManager),
    packages: &[String],
    reporter: &impl ProgressReporter,
) -> Result<(), StepError> {
    if !host.is_privileged() {
        return Err(StepError::Privilege);
    }

    let mut missing = Vec::new();
    for tool in packages {
        if !host.has_tool(tool).await? {
            missing.push(tool.clone());
        }
    }

    if !missing.is_empty() {
        tracing::warn!(packages = ?missing, "installing missing host packages");
        reporter.warn(&format!("installing missing packages: {}", missing.join(", ")));
        host.install(&missing)
            .await
            .map_err(|e| StepError::DependencyRepair {
                packages: missing.clone(),
                reason: format!("{e:#}"),
            })?;
        reporter.success(&format!("installed {}", missing.join(", ")));
    }

    if !host.is_present().await {
        return Err(StepError::ServiceManagerMissing);
    }

    reporter.success("prerequisites satisfied");
    Ok(())
}

/// Map the host CPU to a release architecture. Performs no network access.
///
/// # Errors
///
/// `UnsupportedPlatform` for CPUs without a published archive.
pub fn detect_arch(host: &impl HostInfo) -> Result<Arch, StepError> {
    let machine = host.machine()?;
    let arch = Arch::from_machine(&machine)?;
    tracing::debug!(%machine, %arch, "detected architecture");
    Ok(arch)
}
