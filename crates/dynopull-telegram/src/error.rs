//! Internal error types for Telegram operations.
//!
//! These errors are internal to `dynopull-telegram` and are mapped to core
//! port errors at the boundary.

use thiserror::Error;

/// Result type alias for Telegram operations.
pub type TelegramResult<T> = Result<T, TelegramError>;

/// Errors related to Bot API operations.
#[derive(Debug, Error)]
pub enum TelegramError {
    /// The Bot API answered `ok: false`.
    #[error("Telegram API error {code} in {method}: {description}")]
    Api {
        /// Method that was called
        method: String,
        /// Bot API `error_code`
        code: i64,
        /// Bot API `description`
        description: String,
        /// Seconds to wait before retrying, for flood control errors
        retry_after: Option<u64>,
    },

    /// HTTP error status without a Bot API envelope.
    #[error("Telegram request {method} failed with HTTP status {status}")]
    HttpStatus {
        /// Method that was called
        method: String,
        /// HTTP status code
        status: u16,
    },

    /// The response did not have the expected shape.
    #[error("Invalid response from Telegram for {method}: {message}")]
    InvalidResponse {
        /// Method that was called
        method: String,
        /// Description of what was invalid
        message: String,
    },

    /// Network or HTTP client error. The URL (which contains the token) is
    /// stripped before wrapping.
    #[error("Network error: {0}")]
    Network(reqwest::Error),

    /// URL building error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Local file could not be read for upload.
    #[error("Failed to read {path}: {reason}")]
    File {
        /// The file that was being read
        path: String,
        /// Underlying I/O error
        reason: String,
    },
}

impl From<reqwest::Error> for TelegramError {
    fn from(e: reqwest::Error) -> Self {
        Self::Network(e.without_url())
    }
}

impl TelegramError {
    /// Whether polling cannot recover from this error (bad token).
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Api { code: 401 | 404, .. })
            || matches!(self, Self::HttpStatus { status: 401 | 404, .. })
            || matches!(self, Self::InvalidUrl(_))
    }

    /// Flood-control wait requested by the server.
    pub const fn retry_after(&self) -> Option<u64> {
        match self {
            Self::Api { retry_after, .. } => *retry_after,
            _ => None,
        }
    }
}
