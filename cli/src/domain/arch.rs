//! CPU architecture to release-artifact mapping.

use std::fmt;

use serde::Serialize;

use crate::domain::error::StepError;

/// Architectures the collector publishes Linux archives for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    Amd64,
    Arm64,
}

impl Arch {
    /// Map a `uname -m` machine string to an artifact architecture.
    ///
    /// # Errors
    ///
    /// Returns `StepError::UnsupportedPlatform` for anything other than
    /// x86_64 or aarch64 (and their Debian-style aliases).
    pub fn from_machine(machine: &str) -> Result<Self, StepError> {
        match machine.trim() {
            "x86_64" | "amd64" => Ok(Arch::Amd64),
            "aarch64" | "arm64" => Ok(Arch::Arm64),
            other => Err(StepError::UnsupportedPlatform(other.to_string())),
        }
    }

    /// Tag used in release archive names.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Arch::Amd64 => "amd64",
            Arch::Arm64 => "arm64",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Expand `{version}` and `{arch}` in a release URL template.
#[must_use]
pub fn release_url(template: &str, version: &str, arch: Arch) -> String {
    template
        .replace("{version}", version)
        .replace("{arch}", arch.tag())
}

/// Last path segment of a URL, used as the local archive file name.
#[must_use]
pub fn archive_file_name(url: &str) -> &str {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.rsplit('/').find(|s| !s.is_empty()).unwrap_or("collector.tar.gz")
}
