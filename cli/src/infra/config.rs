//! Infrastructure implementation of the `ConfigStore` port.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::application::ports::ConfigStore;
use crate::domain::{EnvOverrides, InstallerConfig};

/// Prefix of every environment variable the installer reads.
pub const ENV_PREFIX: &str = "COLLECTOR_INSTALLER_";

/// Production implementation of `ConfigStore`: an optional YAML file on disk
/// plus `COLLECTOR_INSTALLER_*` environment overrides.
#[derive(Debug, Clone, Default)]
pub struct YamlConfigStore {
    path: Option<PathBuf>,
}

impl YamlConfigStore {
    #[must_use]
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

impl ConfigStore for YamlConfigStore {
    fn load(&self) -> Result<InstallerConfig> {
        let Some(path) = &self.path else {
            return Ok(InstallerConfig::default());
        };
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file absent, using defaults");
            return Ok(InstallerConfig::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        serde_yaml::from_str(&content).with_context(|| format!("cannot parse {}", path.display()))
    }

    fn path(&self) -> Option<PathBuf> {
        self.path.clone()
    }

    fn overrides(&self) -> Result<EnvOverrides> {
        overrides_from(std::env::vars())
    }
}

/// Parse overrides from `(key, value)` pairs, keeping only prefixed keys.
///
/// # Errors
///
/// Returns an error if a prefixed variable cannot be deserialized.
pub fn overrides_from<I>(vars: I) -> Result<EnvOverrides>
where
    I: IntoIterator<Item = (String, String)>,
{
    envy::prefixed(ENV_PREFIX)
        .from_iter(vars)
        .context("cannot read COLLECTOR_INSTALLER_* environment overrides")
}
