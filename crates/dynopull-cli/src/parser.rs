//! Command-line and environment configuration.
//!
//! Every flag can also be supplied through the environment (or a `.env`
//! file), which is how the bot is usually deployed.

use std::path::PathBuf;

use clap::Parser;
use dynopull_core::{
    DEFAULT_COMMAND_TIMEOUT_SECS, DEFAULT_CONTAINER_PATH, DEFAULT_MAX_DOCUMENT_MB,
    DEFAULT_PROCESS_TYPE, DEFAULT_REGISTRY_HOST, Settings,
};

/// Telegram bot that lists Heroku apps and exports a container's files
/// as a zip archive.
#[derive(Parser)]
#[command(name = "dynopull")]
#[command(about = "Telegram bot that exports Heroku container files")]
#[command(version)]
pub struct Cli {
    /// Telegram bot token from @BotFather
    #[arg(long, env = "TELEGRAM_BOT_TOKEN", hide_env_values = true)]
    pub telegram_token: String,

    /// Initial Heroku API key (can be replaced at runtime with /setapi)
    #[arg(long, env = "HEROKU_API_KEY", hide_env_values = true)]
    pub heroku_api_key: Option<String>,

    /// Telegram user IDs allowed to use the bot (comma-separated; empty allows everyone)
    #[arg(long, env = "DYNOPULL_ALLOWED_USERS", value_delimiter = ',')]
    pub allowed_users: Vec<i64>,

    /// Dyno process type whose image is pulled
    #[arg(long, env = "DYNOPULL_PROCESS_TYPE", default_value = DEFAULT_PROCESS_TYPE)]
    pub process_type: String,

    /// Directory inside the container to export
    #[arg(long, env = "DYNOPULL_CONTAINER_PATH", default_value = DEFAULT_CONTAINER_PATH)]
    pub container_path: String,

    /// Container registry host
    #[arg(long, env = "DYNOPULL_REGISTRY_HOST", default_value = DEFAULT_REGISTRY_HOST)]
    pub registry_host: String,

    /// Heroku CLI executable
    #[arg(long, env = "DYNOPULL_HEROKU_BIN", default_value = "heroku")]
    pub heroku_bin: String,

    /// Docker CLI executable
    #[arg(long, env = "DYNOPULL_DOCKER_BIN", default_value = "docker")]
    pub docker_bin: String,

    /// Timeout for each heroku/docker invocation, in seconds
    #[arg(long, env = "DYNOPULL_COMMAND_TIMEOUT_SECS", default_value_t = DEFAULT_COMMAND_TIMEOUT_SECS)]
    pub command_timeout_secs: u64,

    /// Largest archive sent back to the chat, in MiB
    #[arg(long, env = "DYNOPULL_MAX_DOCUMENT_MB", default_value_t = DEFAULT_MAX_DOCUMENT_MB)]
    pub max_document_mb: u64,

    /// Parent directory for per-request working directories
    #[arg(long, env = "DYNOPULL_WORK_DIR")]
    pub work_dir: Option<PathBuf>,
}

impl Cli {
    /// Convert parsed arguments into application settings.
    pub fn into_settings(self) -> Settings {
        Settings {
            telegram_token: self.telegram_token,
            heroku_api_key: self.heroku_api_key.filter(|key| !key.trim().is_empty()),
            allowed_users: self.allowed_users,
            process_type: self.process_type,
            container_path: self.container_path,
            registry_host: self.registry_host,
            heroku_bin: self.heroku_bin,
            docker_bin: self.docker_bin,
            command_timeout_secs: self.command_timeout_secs,
            max_document_mb: self.max_document_mb,
            work_dir: self.work_dir,
        }
    }
}
