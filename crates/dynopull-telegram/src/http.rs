//! HTTP backend abstraction for the Bot API.
//!
//! This module provides a trait-based HTTP backend that allows for
//! dependency injection and easy testing. The production implementation
//! uses reqwest; the Bot API response envelope is unwrapped here so the
//! client only ever sees the `result` payload or a typed error.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use url::Url;

use crate::config::TelegramClientConfig;
use crate::error::{TelegramError, TelegramResult};
use crate::models::ApiEnvelope;

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// A document upload for `sendDocument`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentUpload {
    pub chat_id: i64,
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub caption: Option<String>,
}

/// Trait for HTTP backends that can call Bot API methods.
///
/// Both methods return the unwrapped `result` field of a successful
/// response.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// POST a JSON body to a Bot API method.
    async fn call(&self, method: &str, body: &Value, timeout: Duration) -> TelegramResult<Value>;

    /// Upload a document with `sendDocument` as multipart form data.
    async fn upload_document(
        &self,
        upload: DocumentUpload,
        timeout: Duration,
    ) -> TelegramResult<Value>;
}

/// Unwrap a Bot API response body.
///
/// The Bot API reports errors with a JSON envelope and a matching HTTP
/// status, so the body is parsed before the status is looked at.
pub(crate) fn unwrap_envelope(method: &str, status: u16, body: &[u8]) -> TelegramResult<Value> {
    let envelope: ApiEnvelope = match serde_json::from_slice(body) {
        Ok(envelope) => envelope,
        Err(_) if !(200..300).contains(&status) => {
            return Err(TelegramError::HttpStatus {
                method: method.to_string(),
                status,
            });
        }
        Err(e) => return Err(e.into()),
    };

    if envelope.ok {
        return envelope
            .result
            .ok_or_else(|| TelegramError::InvalidResponse {
                method: method.to_string(),
                message: "missing result field".to_string(),
            });
    }

    Err(TelegramError::Api {
        method: method.to_string(),
        code: envelope.error_code.unwrap_or_else(|| i64::from(status)),
        description: envelope
            .description
            .unwrap_or_else(|| "no description".to_string()),
        retry_after: envelope.parameters.and_then(|p| p.retry_after),
    })
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production HTTP backend using reqwest.
pub struct ReqwestBackend {
    client: reqwest::Client,
    /// `<base_url>/bot<token>/`; never logged.
    method_base: Url,
}

impl ReqwestBackend {
    /// Create a new reqwest backend with the given configuration.
    pub fn new(config: &TelegramClientConfig) -> TelegramResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        let method_base = Url::parse(&format!(
            "{}/bot{}/",
            config.base_url.trim_end_matches('/'),
            config.token
        ))?;

        Ok(Self {
            client,
            method_base,
        })
    }

    fn method_url(&self, method: &str) -> TelegramResult<Url> {
        Ok(self.method_base.join(method)?)
    }

    async fn finish(method: &str, response: reqwest::Response) -> TelegramResult<Value> {
        let status = response.status().as_u16();
        let body = response.bytes().await?;
        unwrap_envelope(method, status, &body)
    }
}

fn mime_for(file_name: &str) -> &'static str {
    if file_name.to_ascii_lowercase().ends_with(".zip") {
        "application/zip"
    } else {
        "application/octet-stream"
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn call(&self, method: &str, body: &Value, timeout: Duration) -> TelegramResult<Value> {
        let response = self
            .client
            .post(self.method_url(method)?)
            .timeout(timeout)
            .json(body)
            .send()
            .await?;
        Self::finish(method, response).await
    }

    async fn upload_document(
        &self,
        upload: DocumentUpload,
        timeout: Duration,
    ) -> TelegramResult<Value> {
        const METHOD: &str = "sendDocument";

        let part = Part::bytes(upload.bytes)
            .file_name(upload.file_name.clone())
            .mime_str(mime_for(&upload.file_name))?;
        let mut form = Form::new()
            .text("chat_id", upload.chat_id.to_string())
            .part("document", part);
        if let Some(caption) = upload.caption {
            form = form.text("caption", caption);
        }

        let response = self
            .client
            .post(self.method_url(METHOD)?)
            .timeout(timeout)
            .multipart(form)
            .send()
            .await?;
        Self::finish(METHOD, response).await
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================
