//! Provisioning stages, in execution order.

use std::fmt;

use serde::Serialize;

/// One step of the installation sequence.
///
/// Stages run strictly in declaration order. A run either reaches `Summary`
/// or stops at the first stage that fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Preflight,
    ArchDetect,
    Fetch,
    Install,
    Directories,
    ServiceUnit,
    Configure,
    Validate,
    Activate,
    Summary,
}

impl Stage {
    /// Stable lowercase name used in logs and error messages.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Preflight => "preflight",
            Stage::ArchDetect => "arch-detect",
            Stage::Fetch => "fetch",
            Stage::Install => "install",
            Stage::Directories => "directories",
            Stage::ServiceUnit => "service-unit",
            Stage::Configure => "configure",
            Stage::Validate => "validate",
            Stage::Activate => "activate",
            Stage::Summary => "summary",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
