//! Collector configuration: template download, hostname, substitution, validation.

use crate::application::ports::{
    CommandRunner, HostInfo, HttpFetcher, InstanceMetadata, LocalFs, ProgressReporter,
};
use crate::domain::hostname::{self, ResolvedHostname};
use crate::domain::template;
use crate::domain::{InstallPaths, InstallerConfig, StepError};

use super::artifact::download_nonempty;
use super::utf8;

/// Download the template to the config path and fill in both placeholders.
///
/// A template that lacks a token is left as is for that token, with a warning.
///
/// # Errors
///
/// `Fetch` when the template cannot be downloaded, `ConfigValidation` when a
/// placeholder survives substitution.
pub async fn write_config(
    host: &impl HostInfo,
    fs: &impl LocalFs,
    net: &(impl HttpFetcher + InstanceMetadata),
    config: &InstallerConfig,
    reporter: &impl ProgressReporter,
) -> Result<ResolvedHostname, StepError> {
    let dest = &config.paths.config_file;
    let url = &config.config_template_url;

    reporter.step("fetching configuration template...");
    tracing::debug!(%url, dest = %dest.display(), "downloading config template");
    download_nonempty(fs, net, url, dest, config).await?;

    let resolved = resolve_hostname(host, net, &config.service_name, reporter).await?;

    let raw = fs.read_to_string(dest)?;
    let rendered = template::render(&raw, &config.backend_endpoint, &resolved.value);
    for token in &rendered.missing {
        tracing::warn!(%token, "placeholder not present in template");
        reporter.warn(&format!("template does not contain {token}; nothing substituted"));
    }
    let leftover = template::unresolved(&rendered.text);
    if !leftover.is_empty() {
        return Err(StepError::ConfigValidation {
            output: format!("unresolved placeholders: {}", leftover.join(", ")),
        });
    }
    fs.write(dest, &rendered.text)?;

    reporter.success(&format!("configuration written to {}", dest.display()));
    Ok(resolved)
}

/// `<service>-<instance-id>` on a cloud instance, `<service>-<hostname>` elsewhere.
///
/// The local hostname is only read when no instance id is available. A
/// metadata service that hands out a token but fails the id query is treated
/// as absent.
///
/// # Errors
///
/// Returns an error if the local hostname is needed and cannot be read.
pub async fn resolve_hostname(
    host: &impl HostInfo,
    metadata: &impl InstanceMetadata,
    service_name: &str,
    reporter: &impl ProgressReporter,
) -> Result<ResolvedHostname, StepError> {
    let instance_id = match metadata.instance_id().await {
        Ok(id) => id.filter(|id| !id.trim().is_empty()),
        Err(e) => {
            tracing::warn!(error = %format!("{e:#}"), "instance id query failed");
            reporter.warn("instance metadata unavailable; using local hostname");
            None
        }
    };

    let resolved = match instance_id {
        Some(id) => hostname::derive(service_name, Some(&id), ""),
        None => hostname::derive(service_name, None, &host.hostname()?),
    };
    tracing::info!(hostname = %resolved.value, source = ?resolved.source, "hostname resolved");
    Ok(resolved)
}

/// Run the collector's own validator on the written configuration.
///
/// # Errors
///
/// `ConfigValidation` with the collector's output on a non-zero exit.
pub async fn validate(
    runner: &impl CommandRunner,
    paths: &InstallPaths,
    reporter: &impl ProgressReporter,
) -> Result<(), StepError> {
    let binary = utf8(&paths.binary)?;
    let config_arg = format!("--config={}", utf8(&paths.config_file)?);

    reporter.step("validating configuration...");
    let output = runner.run(binary, &["validate", &config_arg]).await?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let text = if stderr.is_empty() {
            String::from_utf8_lossy(&output.stdout).trim().to_string()
        } else {
            stderr
        };
        tracing::error!(status = %output.status, "collector rejected configuration");
        return Err(StepError::ConfigValidation { output: text });
    }

    reporter.success("configuration is valid");
    Ok(())
}
