//! Telegram Bot API client.
//!
//! This module provides the main client interface. Methods are split by
//! concern: receiving updates (`updates`) and sending or deleting messages
//! (`messages`).

mod messages;
mod updates;

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::TelegramClientConfig;
use crate::error::{TelegramError, TelegramResult};
use crate::http::{HttpBackend, ReqwestBackend};

// ============================================================================
// Type Aliases
// ============================================================================

/// Default Telegram client using the reqwest HTTP backend.
pub type DefaultTelegramClient = TelegramClient<ReqwestBackend>;

// ============================================================================
// Client
// ============================================================================

/// Client for the Telegram Bot API.
///
/// This client is generic over an HTTP backend, allowing for easy testing.
/// Use `DefaultTelegramClient` for production code.
pub struct TelegramClient<B: HttpBackend> {
    pub(crate) backend: B,
    pub(crate) request_timeout: Duration,
    pub(crate) upload_timeout: Duration,
    pub(crate) poll_timeout: Duration,
    pub(crate) get_updates_timeout: Duration,
}

impl DefaultTelegramClient {
    /// Create a new client with the given configuration.
    pub fn new(config: &TelegramClientConfig) -> TelegramResult<Self> {
        let backend = ReqwestBackend::new(config)?;
        Ok(Self::with_backend(config, backend))
    }
}

impl<B: HttpBackend> TelegramClient<B> {
    /// Create a new client with a custom backend.
    pub fn with_backend(config: &TelegramClientConfig, backend: B) -> Self {
        Self {
            backend,
            request_timeout: config.request_timeout,
            upload_timeout: config.upload_timeout,
            poll_timeout: config.poll_timeout,
            get_updates_timeout: config.get_updates_timeout(),
        }
    }

    /// Access the underlying backend.
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Call a method with the ordinary request timeout and decode its result.
    pub(crate) async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        body: &Value,
    ) -> TelegramResult<T> {
        let result = self
            .backend
            .call(method, body, self.request_timeout)
            .await?;
        decode(method, result)
    }
}

/// Decode a `result` payload into a typed value.
pub(crate) fn decode<T: DeserializeOwned>(method: &str, value: Value) -> TelegramResult<T> {
    serde_json::from_value(value).map_err(|e| TelegramError::InvalidResponse {
        method: method.to_string(),
        message: e.to_string(),
    })
}
