//! Core domain types, port definitions and command handlers for dynopull.
//!
//! This crate is framework-agnostic: the Telegram transport, the process
//! runner and the zip archiver live behind ports implemented in adapter
//! crates (`dynopull-telegram`, `dynopull-runtime`).
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;
pub mod settings;
pub mod utils;

// Re-export commonly used types for convenience
pub use domain::{ApiKey, AppName, BotCommand, ChatRequest, DomainError};
pub use error::BotError;
pub use ports::{
    ArchiveError, ArchiveSummary, Archiver, ChatId, ChatTransport, CommandOutput, CommandRunner,
    CommandSpec, MessageId, OutgoingDocument, ProcessError, TransportError, UserId,
};
pub use services::{BotService, BotServiceConfig, CredentialStore, GatewayConfig, HerokuGateway};
pub use settings::{
    DEFAULT_COMMAND_TIMEOUT_SECS, DEFAULT_CONTAINER_PATH, DEFAULT_MAX_DOCUMENT_MB,
    DEFAULT_PROCESS_TYPE, DEFAULT_REGISTRY_HOST, Settings, SettingsError, validate_settings,
};

// Silence unused dev-dependency warnings
#[cfg(test)]
use tokio_test as _;
