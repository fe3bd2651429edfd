//! Public configuration for the Telegram client.
//!
//! This module provides a stable public API for configuring the client.

use std::time::Duration;

/// Configuration for the Telegram Bot API client.
///
/// Use the builder pattern methods to customize the client configuration.
///
/// # Example
///
/// ```
/// use dynopull_telegram::TelegramClientConfig;
/// use std::time::Duration;
///
/// let config = TelegramClientConfig::new("123:abc")
///     .with_poll_timeout(Duration::from_secs(50))
///     .with_user_agent("my-bot/1.0");
/// ```
#[derive(Clone)]
pub struct TelegramClientConfig {
    /// Base URL for the Bot API
    pub(crate) base_url: String,
    /// Bot token issued by `BotFather`
    pub(crate) token: String,
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
    /// Timeout for ordinary API calls
    pub(crate) request_timeout: Duration,
    /// Timeout for document uploads
    pub(crate) upload_timeout: Duration,
    /// How long `getUpdates` waits server-side for new updates
    pub(crate) poll_timeout: Duration,
}

impl TelegramClientConfig {
    /// Create a configuration with default settings for the given token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            base_url: "https://api.telegram.org".to_string(),
            token: token.into(),
            user_agent: concat!("dynopull/", env!("CARGO_PKG_VERSION")).to_string(),
            request_timeout: Duration::from_secs(30),
            upload_timeout: Duration::from_secs(300),
            poll_timeout: Duration::from_secs(30),
        }
    }

    /// Set the base URL for the Bot API.
    ///
    /// Defaults to `https://api.telegram.org`. Useful for a local Bot API
    /// server, which also lifts the upload size limit.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the user agent string for HTTP requests.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the timeout for ordinary API calls.
    ///
    /// Defaults to 30 seconds.
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the timeout for document uploads.
    ///
    /// Defaults to 5 minutes.
    #[must_use]
    pub const fn with_upload_timeout(mut self, timeout: Duration) -> Self {
        self.upload_timeout = timeout;
        self
    }

    /// Set the long-poll timeout for `getUpdates`.
    ///
    /// Defaults to 30 seconds.
    #[must_use]
    pub const fn with_poll_timeout(mut self, timeout: Duration) -> Self {
        self.poll_timeout = timeout;
        self
    }

    /// HTTP timeout for a `getUpdates` call: the poll window plus slack.
    pub(crate) fn get_updates_timeout(&self) -> Duration {
        self.poll_timeout + Duration::from_secs(10)
    }
}

impl std::fmt::Debug for TelegramClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramClientConfig")
            .field("base_url", &self.base_url)
            .field("token", &"***")
            .field("user_agent", &self.user_agent)
            .field("request_timeout", &self.request_timeout)
            .field("upload_timeout", &self.upload_timeout)
            .field("poll_timeout", &self.poll_timeout)
            .finish()
    }
}
