//! Telegram Bot API adapter for dynopull.
//!
//! This crate provides:
//! - [`TelegramClient`]: typed wrapper over the Bot API methods the bot uses
//! - [`TelegramTransport`]: implementation of the core `ChatTransport` port
//! - [`Poller`]: the long-polling loop feeding commands to `BotService`
//!
//! Internal error types never cross the crate boundary through the port;
//! they are mapped to `TransportError` in [`port`].
#![deny(unused_crate_dependencies)]

mod client;
mod config;
mod error;
mod http;
mod models;
mod poller;
mod port;

pub use client::{DefaultTelegramClient, TelegramClient};
pub use config::TelegramClientConfig;
pub use error::{TelegramError, TelegramResult};
pub use http::{DocumentUpload, HttpBackend, ReqwestBackend};
pub use models::{Chat, Message, Update, User};
pub use poller::{Poller, to_request};
pub use port::TelegramTransport;

// Silence unused dev-dependency warnings
#[cfg(test)]
use tokio_test as _;
