//! systemd unit rendering.

use std::path::Path;

/// Render the collector's service unit.
///
/// Output depends only on its arguments, so rewriting it on every run
/// produces byte-identical files.
#[must_use]
pub fn render_unit(description: &str, binary: &Path, config_file: &Path) -> String {
    format!(
        "[Unit]
Description={description}
After=network-online.target
Wants=network-online.target

[Service]
Type=simple
ExecStart={binary} --config={config}
Restart=on-failure
RestartSec=5

[Install]
WantedBy=multi-user.target
",
        binary = binary.display(),
        config = config_file.display(),
    )
}

/// Unit name as `systemctl` expects it, e.g. `otelcol-contrib.service`.
#[must_use]
pub fn unit_name(unit_file: &Path) -> String {
    unit_file
        .file_name()
        .map_or_else(|| "otelcol-contrib.service".to_string(), |n| n.to_string_lossy().into_owned())
}
