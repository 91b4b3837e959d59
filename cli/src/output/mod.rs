//! Output formatting module

pub mod human;
pub mod json;
pub mod reporter;
pub mod styles;

use std::path::Path;

use anyhow::Result;
use console::Term;
use owo_colors::OwoColorize as _;

use crate::domain::{InstallReport, InstallerConfig};

pub use human::HumanRenderer;
pub use json::JsonRenderer;
pub use reporter::TerminalReporter;
pub use styles::Styles;

/// Output context carrying styling and terminal state.
pub struct OutputContext {
    /// Stylesheet for colored output.
    pub styles: Styles,
    /// Whether stdout is a TTY.
    pub is_tty: bool,
    /// Whether to suppress non-error output.
    pub quiet: bool,
}

impl OutputContext {
    /// Create output context based on CLI flags and environment.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let is_tty = Term::stdout().is_term();
        let use_colors = !no_color && is_tty && std::env::var("NO_COLOR").is_err();

        let mut styles = Styles::default();
        if use_colors {
            styles.colorize();
        }

        Self {
            styles,
            is_tty,
            quiet,
        }
    }

    /// Print an in-progress step prefixed with `→`. Suppressed when `quiet`.
    pub fn step(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "→".style(self.styles.step));
        }
    }

    /// Print a success message prefixed with `✓`. Suppressed when `quiet`.
    pub fn success(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "✓".style(self.styles.success));
        }
    }

    /// Print a warning message prefixed with `⚠`. Suppressed when `quiet`.
    pub fn warn(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "⚠".style(self.styles.warning));
        }
    }

    /// Print an error message prefixed with `✗` to stderr. Never suppressed.
    pub fn error(&self, msg: &str) {
        eprintln!("  {} {msg}", "✗".style(self.styles.error));
    }

    /// Print a section header. Suppressed when `quiet`.
    pub fn header(&self, msg: &str) {
        if !self.quiet {
            println!("  {}", msg.style(self.styles.header));
        }
    }

    /// Print a key-value pair with the key dimmed. Suppressed when `quiet`.
    pub fn kv(&self, key: &str, value: &str) {
        if !self.quiet {
            println!("  {:<16} {value}", key.style(self.styles.dim));
        }
    }

    /// Print captured command output, indented and dimmed. Suppressed when `quiet`.
    pub fn block(&self, text: &str) {
        if self.quiet {
            return;
        }
        for line in indent(text).lines() {
            println!("{}", line.style(self.styles.dim));
        }
    }
}

/// Indent every non-empty line by four spaces.
#[must_use]
pub fn indent(text: &str) -> String {
    text.lines()
        .map(|l| {
            if l.trim().is_empty() {
                String::new()
            } else {
                format!("    {l}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders command results in the mode chosen on the command line.
pub enum Renderer<'a> {
    Human(HumanRenderer<'a>),
    Json(JsonRenderer),
}

impl Renderer<'_> {
    /// Render the summary of a completed installation.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_report(&self, report: &InstallReport) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_report(report);
                Ok(())
            }
            Self::Json(_) => JsonRenderer::render_report(report),
        }
    }

    /// Render the resolved configuration and where it came from.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_config(&self, config: &InstallerConfig, source: Option<&Path>) -> Result<()> {
        match self {
            Self::Human(r) => r.render_config(config, source),
            Self::Json(_) => JsonRenderer::render_config(config, source),
        }
    }

    /// Render the tool version.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_version(&self, version: &str) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_version(version);
                Ok(())
            }
            Self::Json(_) => JsonRenderer::render_version(version),
        }
    }
}
