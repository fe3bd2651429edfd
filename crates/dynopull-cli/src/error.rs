//! CLI-specific error types and mappings.
//!
//! Errors from the core and adapter crates are mapped to exit codes here.

use dynopull_core::{DomainError, SettingsError};
use dynopull_telegram::TelegramError;
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid configuration values.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Local filesystem problem during startup.
    #[error("IO error: {0}")]
    Io(String),

    /// Telegram refused the token or could not be reached.
    #[error("Telegram error: {0}")]
    Telegram(#[from] TelegramError),
}

impl CliError {
    /// Map error to an exit code (see sysexits.h).
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 78,   // EX_CONFIG
            Self::Io(_) => 74,       // EX_IOERR
            Self::Telegram(_) => 69, // EX_UNAVAILABLE
        }
    }
}

impl From<SettingsError> for CliError {
    fn from(err: SettingsError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<DomainError> for CliError {
    fn from(err: DomainError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
