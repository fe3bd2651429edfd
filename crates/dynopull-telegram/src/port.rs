//! `ChatTransport` implementation over the Bot API client.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use dynopull_core::ports::{ChatId, ChatTransport, MessageId, OutgoingDocument, TransportError};

use crate::client::TelegramClient;
use crate::error::TelegramError;
use crate::http::HttpBackend;

/// Telegram adapter for the core chat transport port.
pub struct TelegramTransport<B: HttpBackend> {
    client: Arc<TelegramClient<B>>,
}

impl<B: HttpBackend> TelegramTransport<B> {
    pub const fn new(client: Arc<TelegramClient<B>>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<B: HttpBackend + 'static> ChatTransport for TelegramTransport<B> {
    async fn send_text(&self, chat: ChatId, text: &str) -> Result<(), TransportError> {
        self.client
            .send_message(chat, text)
            .await
            .map(|_| ())
            .map_err(map_error)
    }

    async fn send_document(
        &self,
        chat: ChatId,
        document: &OutgoingDocument,
    ) -> Result<(), TransportError> {
        self.client
            .send_document(
                chat,
                &document.path,
                &document.file_name,
                document.caption.as_deref(),
            )
            .await
            .map(|_| ())
            .map_err(map_error)
    }

    async fn delete_message(
        &self,
        chat: ChatId,
        message: MessageId,
    ) -> Result<(), TransportError> {
        self.client
            .delete_message(chat, message)
            .await
            .map(|_| ())
            .map_err(map_error)
    }
}

/// Map internal Telegram errors to the core transport error.
fn map_error(err: TelegramError) -> TransportError {
    match err {
        TelegramError::Api {
            code,
            retry_after,
            description,
            ..
        } => match retry_after {
            Some(retry_after_secs) => TransportError::RateLimited { retry_after_secs },
            None if code == 429 => TransportError::RateLimited {
                retry_after_secs: 1,
            },
            None => TransportError::Rejected {
                message: description,
            },
        },
        TelegramError::HttpStatus { .. } | TelegramError::InvalidResponse { .. } => {
            TransportError::Rejected {
                message: err.to_string(),
            }
        }
        TelegramError::Network(_) | TelegramError::InvalidUrl(_) | TelegramError::JsonParse(_) => {
            TransportError::Network {
                message: err.to_string(),
            }
        }
        TelegramError::File { path, reason } => TransportError::File {
            path: PathBuf::from(path),
            reason,
        },
    }
}
