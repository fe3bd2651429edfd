//! Settings domain types and validation.
//!
//! This module contains the runtime configuration used across the
//! application. Adapters (the CLI) build it from flags and environment;
//! [`validate_settings`] is the single gate before wiring.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::services::{BotServiceConfig, GatewayConfig};

/// Dyno process type whose image is exported.
pub const DEFAULT_PROCESS_TYPE: &str = "worker";

/// Path inside the container that gets copied out.
pub const DEFAULT_CONTAINER_PATH: &str = "/app";

/// Heroku container registry host.
pub const DEFAULT_REGISTRY_HOST: &str = "registry.heroku.com";

/// Per-command timeout for external tools (pulls can be slow).
pub const DEFAULT_COMMAND_TIMEOUT_SECS: u64 = 900;

/// Largest document the Telegram Bot API accepts for upload, in MiB.
pub const DEFAULT_MAX_DOCUMENT_MB: u64 = 50;

/// Application settings.
#[derive(Clone, PartialEq, Eq)]
pub struct Settings {
    /// Telegram bot token.
    pub telegram_token: String,

    /// Initial Heroku API key; `/setapi` overrides it at runtime.
    pub heroku_api_key: Option<String>,

    /// Telegram user IDs allowed to issue commands (empty allows everyone).
    pub allowed_users: Vec<i64>,

    /// Dyno process type used in registry references.
    pub process_type: String,

    /// Absolute path inside the container to export.
    pub container_path: String,

    /// Registry host for image references.
    pub registry_host: String,

    /// Heroku CLI executable.
    pub heroku_bin: String,

    /// Docker CLI executable.
    pub docker_bin: String,

    /// Timeout for each external command, in seconds.
    pub command_timeout_secs: u64,

    /// Largest archive sent back to the chat, in MiB.
    pub max_document_mb: u64,

    /// Parent directory for per-request working directories.
    /// Uses the system temp directory when unset.
    pub work_dir: Option<PathBuf>,
}

impl Settings {
    /// Create settings with sensible defaults for the given bot token.
    pub fn with_token(telegram_token: impl Into<String>) -> Self {
        Self {
            telegram_token: telegram_token.into(),
            heroku_api_key: None,
            allowed_users: Vec::new(),
            process_type: DEFAULT_PROCESS_TYPE.to_string(),
            container_path: DEFAULT_CONTAINER_PATH.to_string(),
            registry_host: DEFAULT_REGISTRY_HOST.to_string(),
            heroku_bin: "heroku".to_string(),
            docker_bin: "docker".to_string(),
            command_timeout_secs: DEFAULT_COMMAND_TIMEOUT_SECS,
            max_document_mb: DEFAULT_MAX_DOCUMENT_MB,
            work_dir: None,
        }
    }

    pub const fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs)
    }

    pub const fn max_document_bytes(&self) -> u64 {
        self.max_document_mb.saturating_mul(1024 * 1024)
    }

    /// Configuration for the Heroku/Docker command builder.
    pub fn gateway_config(&self) -> GatewayConfig {
        GatewayConfig {
            heroku_bin: self.heroku_bin.clone(),
            docker_bin: self.docker_bin.clone(),
            registry_host: self.registry_host.clone(),
            process_type: self.process_type.clone(),
            container_path: self.container_path.clone(),
        }
    }

    /// Configuration for the command handlers.
    pub fn bot_config(&self) -> BotServiceConfig {
        BotServiceConfig {
            allowed_users: self.allowed_users.clone(),
            max_document_bytes: self.max_document_bytes(),
            work_dir: self.work_dir.clone(),
        }
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("telegram_token", &"***")
            .field("heroku_api_key", &self.heroku_api_key.as_ref().map(|_| "***"))
            .field("allowed_users", &self.allowed_users)
            .field("process_type", &self.process_type)
            .field("container_path", &self.container_path)
            .field("registry_host", &self.registry_host)
            .field("heroku_bin", &self.heroku_bin)
            .field("docker_bin", &self.docker_bin)
            .field("command_timeout_secs", &self.command_timeout_secs)
            .field("max_document_mb", &self.max_document_mb)
            .field("work_dir", &self.work_dir)
            .finish()
    }
}

/// Errors that can occur during settings validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Telegram bot token cannot be empty")]
    EmptyToken,

    #[error("{0} executable cannot be empty")]
    EmptyExecutable(&'static str),

    #[error("Invalid process type '{0}': use lowercase letters, digits, '-' or '_'")]
    InvalidProcessType(String),

    #[error("Container path must be absolute, got '{0}'")]
    RelativeContainerPath(String),

    #[error("Registry host cannot be empty")]
    EmptyRegistryHost,

    #[error("Command timeout must be at least one second")]
    ZeroTimeout,

    #[error("Maximum document size must be at least 1 MiB")]
    ZeroDocumentLimit,
}

/// Validate settings values.
pub fn validate_settings(settings: &Settings) -> Result<(), SettingsError> {
    if settings.telegram_token.trim().is_empty() {
        return Err(SettingsError::EmptyToken);
    }

    if settings.heroku_bin.trim().is_empty() {
        return Err(SettingsError::EmptyExecutable("Heroku"));
    }
    if settings.docker_bin.trim().is_empty() {
        return Err(SettingsError::EmptyExecutable("Docker"));
    }

    // Process type ends up in a registry path
    let process_type = &settings.process_type;
    if process_type.is_empty()
        || !process_type
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
    {
        return Err(SettingsError::InvalidProcessType(process_type.clone()));
    }

    if !settings.container_path.starts_with('/') {
        return Err(SettingsError::RelativeContainerPath(
            settings.container_path.clone(),
        ));
    }

    if settings.registry_host.trim().is_empty() {
        return Err(SettingsError::EmptyRegistryHost);
    }

    if settings.command_timeout_secs == 0 {
        return Err(SettingsError::ZeroTimeout);
    }

    if settings.max_document_mb == 0 {
        return Err(SettingsError::ZeroDocumentLimit);
    }

    Ok(())
}
