//! Human-readable terminal renderer.

use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::OwoColorize as _;

use crate::domain::{Activation, HostnameSource, InstallReport, InstallerConfig};
use crate::output::OutputContext;

/// Renders domain types as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the CLI version information.
    pub fn render_version(&self, version: &str) {
        println!("collector-installer {version}");
    }

    /// Render the end-of-run summary.
    pub fn render_report(&self, report: &InstallReport) {
        if self.ctx.quiet {
            return;
        }
        println!();
        self.ctx.header("Installation complete");
        println!();
        for (key, value) in summary_rows(report) {
            self.ctx.kv(key, &value);
        }
        println!();
        match report.activation {
            Activation::Started => {
                self.ctx
                    .success(&format!("{} is running", report.unit.style(self.ctx.styles.bold)));
                println!("    Logs: journalctl -u {} -f", report.unit);
            }
            Activation::Declined => {
                self.ctx.warn("Service installed but not started");
                println!("    Start it with: systemctl enable --now {}", report.unit);
            }
        }
        println!();
    }

    /// Render the resolved configuration as YAML, with its source.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized.
    pub fn render_config(&self, config: &InstallerConfig, source: Option<&Path>) -> Result<()> {
        let yaml = serde_yaml::to_string(config).context("cannot serialize config")?;
        println!();
        println!(
            "  {}",
            format!("Configuration ({})", source_label(source)).style(self.ctx.styles.header)
        );
        println!();
        for line in yaml.lines() {
            println!("  {line}");
        }
        println!();
        println!("  {}", "Environment:".style(self.ctx.styles.bold));
        for var in [
            "COLLECTOR_INSTALLER_CONFIG",
            "COLLECTOR_INSTALLER_VERSION",
            "COLLECTOR_INSTALLER_CONFIG_TEMPLATE_URL",
            "COLLECTOR_INSTALLER_BACKEND_ENDPOINT",
            "COLLECTOR_INSTALLER_SERVICE_NAME",
        ] {
            println!(
                "    {:<42} {}",
                format!("{var}:"),
                std::env::var(var).unwrap_or_else(|_| "(not set)".to_string())
            );
        }
        println!();
        Ok(())
    }
}

/// Describe where configuration was loaded from.
#[must_use]
pub fn source_label(source: Option<&Path>) -> String {
    match source {
        Some(path) if path.exists() => path.display().to_string(),
        Some(path) => format!("{} not found, using defaults", path.display()),
        None => "built-in defaults".to_string(),
    }
}

/// Key/value rows of the installation summary.
#[must_use]
pub fn summary_rows(report: &InstallReport) -> Vec<(&'static str, String)> {
    let hostname_origin = match &report.hostname.source {
        HostnameSource::Instance(id) => format!("instance {id}"),
        HostnameSource::Local => "local hostname".to_string(),
    };
    vec![
        ("Collector:", report.collector_version.clone()),
        ("Version:", format!("{} ({})", report.version, report.arch.tag())),
        ("Binary:", report.binary.display().to_string()),
        ("Config:", report.config_file.display().to_string()),
        ("Logs:", report.log_dir.display().to_string()),
        ("Unit:", report.unit_file.display().to_string()),
        ("Endpoint:", report.backend_endpoint.clone()),
        (
            "Hostname:",
            format!("{} (from {hostname_origin})", report.hostname.value),
        ),
        ("Archive SHA256:", report.archive_sha256.clone()),
    ]
}
