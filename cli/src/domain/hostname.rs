//! Instance hostname derivation.

use serde::Serialize;

/// Where the hostname suffix came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum HostnameSource {
    /// Cloud instance identifier from the metadata service.
    Instance(String),
    /// The host's own name.
    Local,
}

/// Hostname written into the collector configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedHostname {
    pub value: String,
    pub source: HostnameSource,
}

/// Compose `<service>-<instance-id>` when an instance id is known, else
/// `<service>-<local-hostname>`. A blank instance id counts as absent.
#[must_use]
pub fn derive(service_name: &str, instance_id: Option<&str>, local_hostname: &str) -> ResolvedHostname {
    match instance_id.map(str::trim).filter(|id| !id.is_empty()) {
        Some(id) => ResolvedHostname {
            value: format!("{service_name}-{id}"),
            source: HostnameSource::Instance(id.to_string()),
        },
        None => ResolvedHostname {
            value: format!("{service_name}-{}", local_hostname.trim()),
            source: HostnameSource::Local,
        },
    }
}
