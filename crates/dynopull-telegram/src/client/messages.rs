//! Sending side: text messages, documents and deletions.

use std::path::Path;

use serde_json::json;
use tracing::debug;

use super::{TelegramClient, decode};
use crate::error::{TelegramError, TelegramResult};
use crate::http::{DocumentUpload, HttpBackend};
use crate::models::Message;

impl<B: HttpBackend> TelegramClient<B> {
    /// Send a plain-text message.
    pub async fn send_message(&self, chat_id: i64, text: &str) -> TelegramResult<Message> {
        self.call("sendMessage", &json!({ "chat_id": chat_id, "text": text }))
            .await
    }

    /// Upload a local file as a document.
    pub async fn send_document(
        &self,
        chat_id: i64,
        path: &Path,
        file_name: &str,
        caption: Option<&str>,
    ) -> TelegramResult<Message> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| TelegramError::File {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        debug!(chat_id, file_name, bytes = bytes.len(), "Uploading document");

        let upload = DocumentUpload {
            chat_id,
            file_name: file_name.to_string(),
            bytes,
            caption: caption.map(str::to_string),
        };
        let result = self
            .backend
            .upload_document(upload, self.upload_timeout)
            .await?;
        decode("sendDocument", result)
    }

    /// Delete a message. Bots can delete incoming messages in private chats
    /// and, with admin rights, in groups.
    pub async fn delete_message(&self, chat_id: i64, message_id: i64) -> TelegramResult<bool> {
        self.call(
            "deleteMessage",
            &json!({ "chat_id": chat_id, "message_id": message_id }),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use crate::client::tests::test_client;
    use crate::error::TelegramError;
    use crate::http::testing::FakeBackend;
    use serde_json::json;

    #[tokio::test]
    async fn test_send_message_body() {
        let client = test_client(FakeBackend::new());
        let message = client.send_message(42, "hello").await.unwrap();
        assert_eq!(message.message_id, 99);
        assert_eq!(
            client.backend().bodies("sendMessage"),
            vec![json!({"chat_id": 42, "text": "hello"})]
        );
    }

    #[tokio::test]
    async fn test_send_document_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("my-app.zip");
        std::fs::write(&path, b"PK\x03\x04data").unwrap();
        let client = test_client(FakeBackend::new());

        client
            .send_document(42, &path, "my-app.zip", Some("my-app: 1 files"))
            .await
            .unwrap();

        let uploads = client.backend().uploads();
        assert_eq!(uploads.len(), 1);
        assert_eq!(uploads[0].chat_id, 42);
        assert_eq!(uploads[0].file_name, "my-app.zip");
        assert_eq!(uploads[0].bytes, b"PK\x03\x04data");
        assert_eq!(uploads[0].caption.as_deref(), Some("my-app: 1 files"));
    }

    #[tokio::test]
    async fn test_send_document_missing_file() {
        let client = test_client(FakeBackend::new());
        let err = client
            .send_document(42, std::path::Path::new("/nonexistent/x.zip"), "x.zip", None)
            .await
            .unwrap_err();
        assert!(matches!(err, TelegramError::File { .. }));
        assert!(client.backend().uploads().is_empty());
    }

    #[tokio::test]
    async fn test_delete_message() {
        let client = test_client(FakeBackend::new());
        assert!(client.delete_message(42, 7).await.unwrap());
        assert_eq!(
            client.backend().bodies("deleteMessage"),
            vec![json!({"chat_id": 42, "message_id": 7})]
        );
    }
}
