//! JSON output helpers.
//!
//! Provides the error-object formatter used by every `--json` code path when
//! a command fails, plus the success documents for each command.

use std::path::Path;

use anyhow::{Context, Result};

use crate::domain::{InstallReport, InstallerConfig};

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "...",
///   "stage": "..."
/// }
/// ```
/// `stage` is present only when a provisioning stage failed.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str, stage: Option<&str>) -> Result<String> {
    let mut obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    if let Some(stage) = stage {
        obj["stage"] = serde_json::Value::String(stage.to_string());
    }
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Machine-readable renderer for `--json`.
pub struct JsonRenderer;

impl JsonRenderer {
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn format_report(report: &InstallReport) -> Result<String> {
        serde_json::to_string_pretty(report).context("JSON serialization failed")
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_report(report: &InstallReport) -> Result<()> {
        println!("{}", Self::format_report(report)?);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn format_config(config: &InstallerConfig, source: Option<&Path>) -> Result<String> {
        let obj = serde_json::json!({
            "source": source.map(|p| p.display().to_string()),
            "loaded_from_file": source.is_some_and(Path::exists),
            "config": config,
        });
        serde_json::to_string_pretty(&obj).context("JSON serialization failed")
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_config(config: &InstallerConfig, source: Option<&Path>) -> Result<()> {
        println!("{}", Self::format_config(config, source)?);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_version(version: &str) -> Result<()> {
        let obj = serde_json::json!({ "version": version });
        println!(
            "{}",
            serde_json::to_string_pretty(&obj).context("JSON serialization failed")?
        );
        Ok(())
    }
}
