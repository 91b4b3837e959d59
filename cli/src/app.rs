//! Application context: unified state passed to every command handler.
//!
//! Adding a new cross-cutting concern (e.g. `--verbose`) requires only one
//! field change here; command signatures stay the same.

use std::path::PathBuf;

use crate::infra::config::YamlConfigStore;
use crate::output::{HumanRenderer, JsonRenderer, OutputContext, Renderer, TerminalReporter};

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

/// Behaviour flags.
pub struct BehaviourFlags {
    /// Skip interactive prompts (also set by `CI` / `COLLECTOR_INSTALLER_YES` env vars).
    pub yes: bool,
    /// Configuration file given with `--config` or `COLLECTOR_INSTALLER_CONFIG`.
    pub config_path: Option<PathBuf>,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Output rendering options.
    pub output: OutputFlags,
    /// Behaviour options.
    pub behaviour: BehaviourFlags,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    ///
    /// Always quiet in JSON mode so progress lines never mix with the
    /// JSON document on stdout.
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Installer configuration source.
    pub config_store: YamlConfigStore,
    /// When `true`, skip interactive prompts and use defaults.
    ///
    /// Set when `--yes` / `-y` is passed, or when the `CI` or
    /// `COLLECTOR_INSTALLER_YES` environment variables are present.
    pub non_interactive: bool,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    #[must_use]
    pub fn new(flags: AppFlags) -> Self {
        let ci_env =
            std::env::var("CI").is_ok() || std::env::var("COLLECTOR_INSTALLER_YES").is_ok();
        let non_interactive = flags.behaviour.yes || ci_env;

        let mode = if flags.output.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };
        let quiet = flags.output.quiet || mode == OutputMode::Json;

        Self {
            output: OutputContext::new(flags.output.no_color, quiet),
            mode,
            config_store: YamlConfigStore::new(flags.behaviour.config_path),
            non_interactive,
        }
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Returns the appropriate `Renderer` variant for the current output mode.
    #[must_use]
    pub fn renderer(&self) -> Renderer<'_> {
        match self.mode {
            OutputMode::Human => Renderer::Human(HumanRenderer::new(&self.output)),
            OutputMode::Json => Renderer::Json(JsonRenderer),
        }
    }

    /// Progress reporter and confirmation prompt for application services.
    #[must_use]
    pub fn reporter(&self) -> TerminalReporter<'_> {
        TerminalReporter::new(&self.output, self.non_interactive)
    }
}
