//! In-memory Heroku credential.

use tokio::sync::RwLock;

use crate::domain::ApiKey;

/// Holds the one Heroku API key shared by every chat.
///
/// The key lives only in process memory; it is seeded at startup and
/// replaced by `/setapi`.
#[derive(Debug, Default)]
pub struct CredentialStore {
    key: RwLock<Option<ApiKey>>,
}

impl CredentialStore {
    pub fn new(initial: Option<ApiKey>) -> Self {
        Self {
            key: RwLock::new(initial),
        }
    }

    /// Current key, if one has been set.
    pub async fn get(&self) -> Option<ApiKey> {
        self.key.read().await.clone()
    }

    /// Replace the key, returning the previous one.
    pub async fn set(&self, key: ApiKey) -> Option<ApiKey> {
        self.key.write().await.replace(key)
    }
}
