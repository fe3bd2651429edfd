//! Chat transport port.
//!
//! The bot service talks back to users only through this trait, so the
//! handlers stay independent of the Telegram wire format.

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

pub use crate::domain::{ChatId, MessageId, UserId};

/// A file to deliver to a chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingDocument {
    /// Name shown to the recipient.
    pub file_name: String,
    /// Local file to upload.
    pub path: PathBuf,
    /// Optional caption sent with the file.
    pub caption: Option<String>,
}

impl OutgoingDocument {
    pub fn new(file_name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            file_name: file_name.into(),
            path: path.into(),
            caption: None,
        }
    }

    #[must_use]
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }
}

/// Errors delivering messages to a chat.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// The chat service refused the request.
    #[error("Chat service rejected the request: {message}")]
    Rejected { message: String },

    /// The chat service asked us to slow down.
    #[error("Rate limited by chat service, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// The request never completed.
    #[error("Network error: {message}")]
    Network { message: String },

    /// A local file could not be read for upload.
    #[error("Failed to read {path}: {reason}")]
    File { path: PathBuf, reason: String },
}

/// Outbound side of a chat service.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Send a plain-text message.
    async fn send_text(&self, chat: ChatId, text: &str) -> Result<(), TransportError>;

    /// Upload a file as a document.
    async fn send_document(
        &self,
        chat: ChatId,
        document: &OutgoingDocument,
    ) -> Result<(), TransportError>;

    /// Delete a message previously sent to the chat.
    async fn delete_message(&self, chat: ChatId, message: MessageId)
    -> Result<(), TransportError>;
}
