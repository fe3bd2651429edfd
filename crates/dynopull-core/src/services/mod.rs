//! Application services.
//!
//! - [`BotService`]: chat command handlers
//! - [`HerokuGateway`]: Heroku/Docker command construction over the runner port
//! - [`CredentialStore`]: the in-memory Heroku API key

mod bot;
mod credentials;
mod heroku;

pub use bot::{
    BotService, BotServiceConfig, EMPTY_OUTPUT_MESSAGE, HELP_MESSAGE, MISSING_KEY_MESSAGE,
    UNAUTHORIZED_MESSAGE, WELCOME_MESSAGE,
};
pub use credentials::CredentialStore;
pub use heroku::{GatewayConfig, HEROKU_API_KEY_ENV, HerokuGateway};
