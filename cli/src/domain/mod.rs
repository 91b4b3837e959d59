//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod arch;
pub mod config;
pub mod error;
pub mod hostname;
pub mod report;
pub mod stage;
pub mod template;
pub mod unit;

pub use arch::Arch;
pub use config::{EnvOverrides, InstallPaths, InstallerConfig, MetadataConfig};
pub use error::{ConfigError, ProvisionError, StepError};
pub use hostname::{HostnameSource, ResolvedHostname};
pub use report::{Activation, InstallReport};
pub use stage::Stage;
