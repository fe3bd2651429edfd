//! Domain types for chat commands and Heroku identifiers.
//!
//! These types carry no infrastructure concerns. Validation happens at
//! construction so handlers never interpolate unchecked user input into
//! registry references or file names.

mod api_key;
mod app_name;
mod command;

use thiserror::Error;

pub use api_key::ApiKey;
pub use app_name::{APP_NAME_MAX_LEN, AppName};
pub use command::{BotCommand, ChatId, ChatRequest, MessageId, UserId};

/// Errors raised while validating user-supplied values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DomainError {
    /// The API key was empty or contained whitespace.
    #[error("API key must be a single non-empty token")]
    InvalidApiKey,

    /// The app name does not follow Heroku naming rules.
    #[error("Invalid app name '{name}': {reason}")]
    InvalidAppName {
        /// The rejected name
        name: String,
        /// Which rule it broke
        reason: &'static str,
    },
}
