//! CLI argument parsing with clap derive

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags, BehaviourFlags, OutputFlags};
use crate::commands;
use crate::domain::{ProvisionError, StepError};
use crate::output::json::format_error;

/// Install the OpenTelemetry Collector as a validated systemd service
#[derive(Parser)]
#[command(name = "collector-installer", version, propagate_version = true)]
pub struct Cli {
    /// Installer configuration file (YAML); a missing file means defaults
    #[arg(long, global = true, env = "COLLECTOR_INSTALLER_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Defaults to `install`
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Download, install, configure, and start the collector (default)
    Install(commands::install::InstallArgs),

    /// Show the resolved installer configuration
    Config,

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<()> {
        let Cli {
            config,
            json,
            quiet,
            no_color,
            command,
        } = self;
        let command = command
            .unwrap_or_else(|| Command::Install(commands::install::InstallArgs::default()));
        let yes = matches!(&command, Command::Install(args) if args.yes);

        let app = AppContext::new(AppFlags {
            output: OutputFlags {
                no_color,
                quiet,
                json,
            },
            behaviour: BehaviourFlags {
                yes,
                config_path: config,
            },
        });

        match command {
            Command::Install(args) => commands::install::run(&app, &args).await,
            Command::Config => commands::config::run(&app),
            Command::Version => commands::version::run(&app),
        }
    }
}

/// Render a top-level error for the terminal.
///
/// Provisioning failures already name their stage and cause; other errors
/// print their whole context chain.
#[must_use]
pub fn error_message(err: &anyhow::Error) -> String {
    match err.downcast_ref::<ProvisionError>() {
        Some(ProvisionError {
            stage,
            cause: StepError::Io(inner),
        }) => format!("{stage} failed: {inner:#}"),
        Some(e) => e.to_string(),
        None => format!("{err:#}"),
    }
}

/// Render a top-level error as the `--json` error object.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn error_json(err: &anyhow::Error) -> Result<String> {
    let message = error_message(err);
    match err.downcast_ref::<ProvisionError>() {
        Some(e) => format_error(&message, e.code(), Some(e.stage.as_str())),
        None => format_error(&message, "error", None),
    }
}
