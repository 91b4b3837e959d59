//! `ServiceManager` for `LinuxHost`, driving `systemctl` and `journalctl`.

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, ServiceManager};
use crate::infra::host::LinuxHost;

impl<R: CommandRunner> LinuxHost<R> {
    async fn systemctl(&self, args: &[&str]) -> Result<String> {
        let output = self
            .runner
            .run("systemctl", args)
            .await
            .with_context(|| format!("running systemctl {}", args.join(" ")))?;
        anyhow::ensure!(
            output.status.success(),
            "systemctl {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr).trim()
        );
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl<R: CommandRunner> ServiceManager for LinuxHost<R> {
    async fn is_present(&self) -> bool {
        self.runner
            .run("systemctl", &["--version"])
            .await
            .is_ok_and(|o| o.status.success())
    }

    async fn daemon_reload(&self) -> Result<()> {
        self.systemctl(&["daemon-reload"]).await.map(drop)
    }

    async fn enable(&self, unit: &str) -> Result<()> {
        self.systemctl(&["enable", unit]).await.map(drop)
    }

    async fn restart(&self, unit: &str) -> Result<()> {
        self.systemctl(&["restart", unit]).await.map(drop)
    }

    async fn is_active(&self, unit: &str) -> Result<bool> {
        let output = self
            .runner
            .run("systemctl", &["is-active", "--quiet", unit])
            .await
            .with_context(|| format!("querying state of {unit}"))?;
        Ok(output.status.success())
    }

    async fn recent_logs(&self, unit: &str, lines: u32) -> Result<String> {
        let lines = lines.to_string();
        let output = self
            .runner
            .run("journalctl", &["-u", unit, "-n", &lines, "--no-pager"])
            .await
            .with_context(|| format!("reading journal for {unit}"))?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    async fn status(&self, unit: &str) -> Result<String> {
        // `systemctl status` exits non-zero for inactive units; the text is still useful.
        let output = self
            .runner
            .run("systemctl", &["status", unit, "--no-pager"])
            .await
            .with_context(|| format!("querying status of {unit}"))?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
