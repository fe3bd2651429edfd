//! External command runner port.
//!
//! Handlers describe a CLI invocation as a [`CommandSpec`] and hand it to a
//! [`CommandRunner`]. The runner owns spawning, output capture and timeouts.

use async_trait::async_trait;
use thiserror::Error;

/// Placeholder substituted for secrets in logs and error text.
const REDACTED: &str = "***";

/// Longest stderr excerpt carried by a [`ProcessError::Failed`].
const STDERR_EXCERPT_LIMIT: usize = 1_500;

/// Description of one external command invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandSpec {
    /// Program name or path.
    pub program: String,
    /// Arguments, passed without shell interpretation.
    pub args: Vec<String>,
    /// Variables added to the inherited environment.
    pub env: Vec<(String, String)>,
    /// Values that must never appear in logs or error messages.
    pub secrets: Vec<String>,
}

impl CommandSpec {
    /// Create a spec for `program` with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    /// Append one argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Add an environment variable for the child.
    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Add an environment variable whose value is a secret.
    #[must_use]
    pub fn secret_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        self.secrets.push(value.clone());
        self.env.push((key.into(), value));
        self
    }

    /// Replace every secret occurring in `text`.
    pub fn redact(&self, text: &str) -> String {
        self.secrets
            .iter()
            .filter(|secret| !secret.is_empty())
            .fold(text.to_string(), |acc, secret| {
                acc.replace(secret.as_str(), REDACTED)
            })
    }

    /// Human-readable command line with secrets redacted.
    pub fn display(&self) -> String {
        let line = std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ");
        self.redact(&line)
    }
}

/// Captured result of a finished command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was killed by a signal.
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn new(status: Option<i32>, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            status,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// A successful run with the given stdout.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self::new(Some(0), stdout, "")
    }

    pub const fn success(&self) -> bool {
        matches!(self.status, Some(0))
    }

    /// Turn a non-zero exit into [`ProcessError::Failed`].
    pub fn check(self, spec: &CommandSpec) -> Result<Self, ProcessError> {
        if self.success() {
            return Ok(self);
        }
        let stderr = spec.redact(self.stderr.trim());
        Err(ProcessError::Failed {
            command: spec.display(),
            status: self.status,
            stderr: truncate_chars(&stderr, STDERR_EXCERPT_LIMIT),
        })
    }
}

/// Errors from running an external command.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProcessError {
    /// The program could not be started (usually not installed).
    #[error("Failed to start '{program}': {reason}")]
    Spawn { program: String, reason: String },

    /// The program ran longer than the configured limit and was killed.
    #[error("'{command}' timed out after {timeout_secs}s")]
    TimedOut { command: String, timeout_secs: u64 },

    /// Reading the program's output failed.
    #[error("I/O error while running '{command}': {reason}")]
    Io { command: String, reason: String },

    /// The program exited unsuccessfully.
    #[error("'{command}' failed ({}): {stderr}", describe_status(*.status))]
    Failed {
        command: String,
        status: Option<i32>,
        stderr: String,
    },
}

fn describe_status(status: Option<i32>) -> String {
    status.map_or_else(
        || "terminated by signal".to_string(),
        |code| format!("exit code {code}"),
    )
}

fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => format!("{}…", &text[..idx]),
        None => text.to_string(),
    }
}

/// Runs external commands to completion.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run the command and capture its output.
    ///
    /// A non-zero exit is NOT an error at this level; callers decide with
    /// [`CommandOutput::check`].
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, ProcessError>;
}
