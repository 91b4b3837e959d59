//! `collector-installer install`: run the provisioning sequence.

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::config_service;
use crate::application::services::provision::{ActivationPolicy, Provisioner, RunOptions};
use crate::infra::fs::HostFs;
use crate::infra::host::LinuxHost;
use crate::infra::http::UreqNetwork;

/// Arguments for the install command.
#[derive(Args, Default)]
pub struct InstallArgs {
    /// Start the service without asking (also `CI` / `COLLECTOR_INSTALLER_YES`)
    #[arg(short, long)]
    pub yes: bool,

    /// Install and validate, but leave the service stopped
    #[arg(long, conflicts_with = "yes")]
    pub no_start: bool,
}

/// Run the install command.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or any stage fails.
pub async fn run(app: &AppContext, args: &InstallArgs) -> Result<()> {
    let config = config_service::load_config(&app.config_store)?;

    let host = LinuxHost::default_runner();
    let fs = HostFs;
    let net = UreqNetwork::new(config.metadata.clone());
    let ui = app.reporter();

    let options = RunOptions {
        activation: if args.no_start {
            ActivationPolicy::Skip
        } else {
            ActivationPolicy::Ask
        },
    };

    app.output.header(&format!(
        "Installing {} {}",
        config.binary_name,
        config.version.trim_start_matches('v')
    ));
    let report = Provisioner::new(&host, &fs, &net, &ui, &config)
        .run(options)
        .await?;
    app.renderer().render_report(&report)
}
