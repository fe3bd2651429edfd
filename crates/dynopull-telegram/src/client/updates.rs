//! Receiving side: `getMe` and long-polled `getUpdates`.

use serde_json::json;

use super::{TelegramClient, decode};
use crate::error::TelegramResult;
use crate::http::HttpBackend;
use crate::models::{Update, User};

impl<B: HttpBackend> TelegramClient<B> {
    /// The bot's own account.
    pub async fn get_me(&self) -> TelegramResult<User> {
        self.call("getMe", &json!({})).await
    }

    /// Long-poll for new message updates.
    ///
    /// `offset` should be one past the last `update_id` seen; passing it
    /// acknowledges everything before it.
    pub async fn get_updates(&self, offset: Option<i64>) -> TelegramResult<Vec<Update>> {
        const METHOD: &str = "getUpdates";

        let mut body = json!({
            "timeout": self.poll_timeout.as_secs(),
            "allowed_updates": ["message"],
        });
        if let Some(offset) = offset {
            body["offset"] = json!(offset);
        }

        let result = self
            .backend
            .call(METHOD, &body, self.get_updates_timeout)
            .await?;
        decode(METHOD, result)
    }
}
