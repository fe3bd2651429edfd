//! Command-line entry point for the dynopull Telegram bot.
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Silence unused dev-dependency warnings
#[cfg(test)]
use tempfile as _;
#[cfg(test)]
use tokio_test as _;

// Used by the binary only
use anyhow as _;
use dotenvy as _;
use tokio as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod error;
pub mod parser;

// Re-export primary types for convenient access
pub use bootstrap::{BotContext, bootstrap, run};
pub use error::CliError;
pub use parser::Cli;
