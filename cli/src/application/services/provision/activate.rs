//! Optional service activation with a single post-start health check.

use std::time::Duration;

use crate::application::ports::{Confirm, ProgressReporter, ServiceManager};
use crate::domain::{Activation, StepError};

/// Journal lines shown when the service fails to come up.
const FAILURE_LOG_LINES: u32 = 50;

/// Whether activation is offered at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationPolicy {
    /// Ask the operator (default answer: yes).
    Ask,
    /// Never enable or start the unit.
    Skip,
}

/// Enable and start the unit if wanted, then check it is active once.
///
/// Declining is a successful outcome and touches nothing.
///
/// # Errors
///
/// `Activation` when the unit fails to start or is inactive after `settle`.
pub async fn activate(
    services: &impl ServiceManager,
    ui: &(impl Confirm + ProgressReporter),
    unit: &str,
    settle: Duration,
    policy: ActivationPolicy,
) -> Result<Activation, StepError> {
    let wanted = match policy {
        ActivationPolicy::Skip => false,
        ActivationPolicy::Ask => ui.confirm(&format!("Start {unit} now?"), true)?,
    };
    if !wanted {
        tracing::info!(%unit, "activation declined");
        ui.step(&format!("not started. Start later with: systemctl enable --now {unit}"));
        return Ok(Activation::Declined);
    }

    services.enable(unit).await?;
    ui.step(&format!("starting {unit}..."));
    if let Err(e) = services.restart(unit).await {
        tracing::error!(%unit, error = %format!("{e:#}"), "start failed");
        dump_logs(services, ui, unit).await;
        return Err(StepError::Activation {
            unit: unit.to_string(),
        });
    }

    tokio::time::sleep(settle).await;

    if !services.is_active(unit).await? {
        tracing::error!(%unit, "unit inactive after start");
        dump_logs(services, ui, unit).await;
        return Err(StepError::Activation {
            unit: unit.to_string(),
        });
    }

    ui.success(&format!("{unit} is running"));
    match services.status(unit).await {
        Ok(status) => ui.detail(&status),
        Err(e) => tracing::debug!(error = %format!("{e:#}"), "status query failed"),
    }
    Ok(Activation::Started)
}

async fn dump_logs(services: &impl ServiceManager, ui: &impl ProgressReporter, unit: &str) {
    match services.recent_logs(unit, FAILURE_LOG_LINES).await {
        Ok(logs) => ui.detail(&logs),
        Err(e) => ui.warn(&format!("could not read journal for {unit}: {e:#}")),
    }
}
