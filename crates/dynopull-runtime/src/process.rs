//! `CommandRunner` implementation on `tokio::process`.
//!
//! Children inherit the bot's environment plus the spec's extra variables,
//! have stdin closed, and are killed when the timeout elapses.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use dynopull_core::ports::{CommandOutput, CommandRunner, CommandSpec, ProcessError};
use dynopull_core::settings::DEFAULT_COMMAND_TIMEOUT_SECS;
use tokio::process::Command;
use tracing::{debug, warn};

/// Runs commands as child processes with a per-command timeout.
#[derive(Debug, Clone)]
pub struct TokioCommandRunner {
    timeout: Duration,
}

impl TokioCommandRunner {
    pub const fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    fn build(spec: &CommandSpec) -> Command {
        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args)
            .envs(spec.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }
}

impl Default for TokioCommandRunner {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_COMMAND_TIMEOUT_SECS))
    }
}

#[async_trait]
impl CommandRunner for TokioCommandRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, ProcessError> {
        let command_line = spec.display();
        let child = Self::build(spec)
            .spawn()
            .map_err(|e| ProcessError::Spawn {
                program: spec.program.clone(),
                reason: e.to_string(),
            })?;
        debug!(command = %command_line, pid = ?child.id(), "Spawned child process");

        // Dropping the wait future on timeout drops the child, and
        // kill_on_drop takes care of the process.
        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(ProcessError::Io {
                    command: command_line,
                    reason: e.to_string(),
                });
            }
            Err(_) => {
                warn!(command = %command_line, timeout_secs = self.timeout.as_secs(), "Child process timed out");
                return Err(ProcessError::TimedOut {
                    command: command_line,
                    timeout_secs: self.timeout.as_secs(),
                });
            }
        };

        Ok(CommandOutput::new(
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        ))
    }
}
