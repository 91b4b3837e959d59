//! `LinuxHost`: the machine being provisioned.
//!
//! Implements `HostInfo` from kernel facts and forwards `CommandRunner` to an
//! inner runner. `PackageManager` and `ServiceManager` for this type live in
//! `infra::packages` and `infra::systemd`.

use std::process::Output;
use std::time::Duration;

use anyhow::Result;

use crate::application::ports::{CommandRunner, HostInfo};
use crate::infra::command_runner::TokioCommandRunner;

/// The local Linux host, driven through `runner`.
pub struct LinuxHost<R> {
    pub(crate) runner: R,
}

impl<R: CommandRunner> LinuxHost<R> {
    #[must_use]
    pub fn new(runner: R) -> Self {
        Self { runner }
    }
}

impl LinuxHost<TokioCommandRunner> {
    /// Host backed by the default tokio process runner.
    #[must_use]
    pub fn default_runner() -> Self {
        Self::new(TokioCommandRunner::default())
    }
}

impl<R: CommandRunner> CommandRunner for LinuxHost<R> {
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output> {
        self.runner.run(program, args).await
    }

    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output> {
        self.runner.run_with_timeout(program, args, timeout).await
    }
}

#[cfg(unix)]
impl<R> HostInfo for LinuxHost<R> {
    fn is_privileged(&self) -> bool {
        nix::unistd::geteuid().is_root()
    }

    fn machine(&self) -> Result<String> {
        let uts = nix::sys::utsname::uname()
            .map_err(|e| anyhow::anyhow!("uname failed: {e}"))?;
        Ok(uts.machine().to_string_lossy().into_owned())
    }

    fn hostname(&self) -> Result<String> {
        let name = nix::unistd::gethostname()
            .map_err(|e| anyhow::anyhow!("gethostname failed: {e}"))?;
        Ok(name.to_string_lossy().into_owned())
    }
}
