//! Infrastructure implementation of the `CommandRunner` port.
//!
//! `TokioCommandRunner` is the production implementation that uses tokio
//! for async process execution with guaranteed timeout and kill.

use std::process::{Output, Stdio};
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::AsyncReadExt;

use crate::application::ports::CommandRunner;

/// Default timeout for `systemctl`, `journalctl`, and collector invocations.
pub const DEFAULT_CMD_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeout for package-manager installs, which may refresh indexes first.
pub const PACKAGE_INSTALL_TIMEOUT: Duration = Duration::from_secs(600);

/// Production `CommandRunner`: spawns the program, collects stdout/stderr
/// concurrently, and kills the child if it outlives the timeout.
pub struct TokioCommandRunner {
    timeout: Duration,
}

impl TokioCommandRunner {
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for TokioCommandRunner {
    fn default() -> Self {
        Self::new(DEFAULT_CMD_TIMEOUT)
    }
}

impl CommandRunner for TokioCommandRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output> {
        self.run_with_timeout(program, args, self.timeout).await
    }

    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output> {
        tracing::debug!(program, ?args, "running command");
        let mut child = tokio::process::Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("failed to spawn {program}"))?;

        let mut stdout_handle = child.stdout.take();
        let mut stderr_handle = child.stderr.take();

        tokio::select! {
            result = async {
                let (status, stdout, stderr) = tokio::join!(
                    child.wait(),
                    async {
                        let mut buf = Vec::new();
                        if let Some(ref mut h) = stdout_handle {
                            let _ = h.read_to_end(&mut buf).await;
                        }
                        buf
                    },
                    async {
                        let mut buf = Vec::new();
                        if let Some(ref mut h) = stderr_handle {
                            let _ = h.read_to_end(&mut buf).await;
                        }
                        buf
                    },
                );
                Ok(Output {
                    status: status.with_context(|| format!("waiting for {program}"))?,
                    stdout,
                    stderr,
                })
            } => result,
            () = tokio::time::sleep(timeout) => {
                let _ = child.kill().await;
                anyhow::bail!("{program} timed out after {}s", timeout.as_secs())
            }
        }
    }
}
