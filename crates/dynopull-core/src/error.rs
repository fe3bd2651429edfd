//! Command handler error type.
//!
//! Every handler returns `Result<(), BotError>`; the service turns the
//! error into the plain-text reply the user sees.

use thiserror::Error;

use crate::domain::DomainError;
use crate::ports::{ArchiveError, ProcessError, TransportError};

/// Errors raised while handling a chat command.
#[derive(Debug, Error)]
pub enum BotError {
    /// A required argument was missing; carries the usage line.
    #[error("Usage: {0}")]
    Usage(&'static str),

    /// User input failed validation.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// An external CLI could not be run or failed.
    #[error(transparent)]
    Process(#[from] ProcessError),

    /// Packaging the exported files failed.
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    /// Replying to the chat failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The per-request working directory could not be created.
    #[error("Failed to prepare working directory: {0}")]
    Workspace(String),

    /// `docker create` succeeded but printed no container ID.
    #[error("docker create did not report a container ID")]
    MissingContainerId,

    /// The archive exceeds the chat service's upload limit.
    #[error("{file_name} is {size} bytes, over the {limit} byte upload limit")]
    ArchiveTooLarge {
        file_name: String,
        size: u64,
        limit: u64,
    },
}

impl BotError {
    /// Text sent back to the chat for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Usage(_) => self.to_string(),
            _ => format!("Error: {self}"),
        }
    }
}
