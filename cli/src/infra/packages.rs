//! `PackageManager` for `LinuxHost`: detects the distribution's package tool
//! and installs through its CLI.

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, PackageManager};
use crate::infra::command_runner::PACKAGE_INSTALL_TIMEOUT;
use crate::infra::host::LinuxHost;

/// Supported package tools, in detection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageTool {
    Apt,
    Dnf,
    Yum,
    Zypper,
    Apk,
}

impl PackageTool {
    const ALL: [PackageTool; 5] = [
        PackageTool::Apt,
        PackageTool::Dnf,
        PackageTool::Yum,
        PackageTool::Zypper,
        PackageTool::Apk,
    ];

    #[must_use]
    pub fn program(self) -> &'static str {
        match self {
            PackageTool::Apt => "apt-get",
            PackageTool::Dnf => "dnf",
            PackageTool::Yum => "yum",
            PackageTool::Zypper => "zypper",
            PackageTool::Apk => "apk",
        }
    }

    /// Arguments that install `packages` without prompting.
    #[must_use]
    pub fn install_args(self, packages: &[String]) -> Vec<String> {
        let prefix: &[&str] = match self {
            PackageTool::Apt | PackageTool::Dnf | PackageTool::Yum => &["install", "-y"],
            PackageTool::Zypper => &["--non-interactive", "install"],
            PackageTool::Apk => &["add", "--no-cache"],
        };
        prefix
            .iter()
            .map(|s| (*s).to_string())
            .chain(packages.iter().cloned())
            .collect()
    }
}

impl<R: CommandRunner> LinuxHost<R> {
    /// First package tool present on `PATH`.
    ///
    /// # Errors
    ///
    /// Returns an error if no supported package tool is installed.
    pub async fn detect_package_tool(&self) -> Result<PackageTool> {
        for tool in PackageTool::ALL {
            if self.has_tool(tool.program()).await? {
                tracing::debug!(tool = tool.program(), "package manager detected");
                return Ok(tool);
            }
        }
        anyhow::bail!("no supported package manager found (apt-get, dnf, yum, zypper, apk)")
    }
}

impl<R: CommandRunner> PackageManager for LinuxHost<R> {
    async fn has_tool(&self, tool: &str) -> Result<bool> {
        let script = format!("command -v {tool}");
        let output = self
            .runner
            .run("sh", &["-c", &script])
            .await
            .with_context(|| format!("checking for {tool}"))?;
        Ok(output.status.success())
    }

    async fn install(&self, packages: &[String]) -> Result<()> {
        let tool = self.detect_package_tool().await?;
        let program = tool.program();

        if tool == PackageTool::Apt {
            let output = self
                .runner
                .run_with_timeout(program, &["update", "-qq"], PACKAGE_INSTALL_TIMEOUT)
                .await?;
            if !output.status.success() {
                tracing::warn!(
                    stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                    "apt-get update failed; installing from cached indexes",
                );
            }
        }

        let args = tool.install_args(packages);
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        let output = self
            .runner
            .run_with_timeout(program, &args, PACKAGE_INSTALL_TIMEOUT)
            .await?;
        anyhow::ensure!(
            output.status.success(),
            "{program} exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
        Ok(())
    }
}
