//! Real subprocess execution on top of `tokio::process`

use super::{ForegroundExit, Invocation, OutputMode, ProcessOutput, ProcessRunner};
use crate::error::{Error, Result};
use crate::shutdown::Shutdown;
use async_trait::async_trait;
use std::ffi::OsString;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::{Child, Command};
use tracing::{debug, warn};

/// Runs invocations as real child processes.
///
/// Children are spawned with `kill_on_drop`, so dropping an in-flight `run`
/// future (for example when a step loses a race against shutdown) stops the
/// child as well.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }

    /// Resolve through PATH so Windows shims like `pnpm.cmd` are found
    fn resolve(program: &str) -> OsString {
        which::which(program)
            .map(|p| p.into_os_string())
            .unwrap_or_else(|_| OsString::from(program))
    }

    fn command(invocation: &Invocation) -> Command {
        let mut cmd = Command::new(Self::resolve(invocation.program()));
        cmd.args(invocation.get_args()).kill_on_drop(true);
        if let Some(dir) = invocation.cwd() {
            cmd.current_dir(dir);
        }
        cmd
    }

    fn spawn(invocation: &Invocation, mut cmd: Command) -> Result<Child> {
        cmd.spawn().map_err(|source| Error::Spawn {
            command: invocation.to_string(),
            source,
        })
    }
}

#[async_trait]
impl ProcessRunner for SystemRunner {
    async fn run(&self, invocation: &Invocation, mode: OutputMode) -> Result<ProcessOutput> {
        debug!(command = %invocation, ?mode, "running");
        let mut cmd = Self::command(invocation);

        let output = match mode {
            OutputMode::Inherit => {
                cmd.stdin(Stdio::inherit())
                    .stdout(Stdio::inherit())
                    .stderr(Stdio::inherit());
                let mut child = Self::spawn(invocation, cmd)?;
                let status = child.wait().await?;
                ProcessOutput {
                    success: status.success(),
                    code: status.code(),
                    ..ProcessOutput::default()
                }
            }
            OutputMode::Capture => {
                cmd.stdin(Stdio::null())
                    .stdout(Stdio::piped())
                    .stderr(Stdio::piped());
                let child = Self::spawn(invocation, cmd)?;
                let out = child.wait_with_output().await?;
                ProcessOutput {
                    success: out.status.success(),
                    code: out.status.code(),
                    stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
                    stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
                }
            }
        };

        if !output.success {
            debug!(command = %invocation, status = %output.status_description(), "command failed");
        }
        Ok(output)
    }

    async fn run_foreground(
        &self,
        invocation: &Invocation,
        shutdown: &Shutdown,
        grace: Duration,
    ) -> Result<ForegroundExit> {
        debug!(command = %invocation, "running in foreground");
        let mut cmd = Self::command(invocation);
        cmd.stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        let mut child = Self::spawn(invocation, cmd)?;

        tokio::select! {
            status = child.wait() => {
                let status = status?;
                Ok(ForegroundExit::Exited {
                    success: status.success(),
                    code: status.code(),
                })
            }
            _ = shutdown.wait() => {
                // The terminal already delivered the interrupt to the child's
                // process group; give it time to stop its own children.
                if tokio::time::timeout(grace, child.wait()).await.is_err() {
                    warn!(command = %invocation, "did not exit within grace period, killing");
                    child.kill().await?;
                }
                Ok(ForegroundExit::Interrupted)
            }
        }
    }

    async fn probe(&self, program: &str, args: &[&str]) -> bool {
        debug!(program, ?args, "probing");
        let status = Command::new(Self::resolve(program))
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .status()
            .await;
        matches!(status, Ok(s) if s.success())
    }
}
