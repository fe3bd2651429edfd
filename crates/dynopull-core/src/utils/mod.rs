//! Small helpers shared by the handlers.

pub mod text;

pub use text::{TELEGRAM_MESSAGE_LIMIT, split_message};
