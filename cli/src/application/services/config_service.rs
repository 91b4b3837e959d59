//! Application service: configuration use-cases.

use anyhow::{Context, Result};

use crate::application::ports::ConfigStore;
use crate::domain::config::InstallerConfig;

/// Load the file (or defaults), apply environment overrides, and validate.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, an override is
/// malformed, or the merged configuration is invalid.
pub fn load_config(store: &impl ConfigStore) -> Result<InstallerConfig> {
    let mut config = store.load()?;
    config.apply_overrides(store.overrides()?);
    config.validate().context("invalid installer configuration")?;
    tracing::debug!(
        version = %config.version,
        service_name = %config.service_name,
        source = ?store.path(),
        "configuration loaded",
    );
    Ok(config)
}
