//! Heroku API key wrapper.

use std::fmt;

use super::DomainError;

/// Number of trailing characters left visible by [`ApiKey::masked`].
const VISIBLE_SUFFIX: usize = 4;

/// A Heroku API key.
///
/// `Debug` output is redacted; use [`ApiKey::expose`] only when handing the
/// key to a child process environment.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Validate and wrap a raw key. Surrounding whitespace is trimmed.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, DomainError> {
        let key = raw.as_ref().trim();
        if key.is_empty() || key.chars().any(char::is_whitespace) {
            return Err(DomainError::InvalidApiKey);
        }
        Ok(Self(key.to_string()))
    }

    /// The raw key.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Render the key with everything but the last few characters hidden.
    ///
    /// Keys too short to keep a suffix hidden are fully masked.
    pub fn masked(&self) -> String {
        let count = self.0.chars().count();
        if count <= VISIBLE_SUFFIX * 2 {
            return "****".to_string();
        }
        let suffix: String = self.0.chars().skip(count - VISIBLE_SUFFIX).collect();
        format!("****{suffix}")
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiKey").field(&self.masked()).finish()
    }
}
