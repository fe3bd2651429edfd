//! Heroku app name validation.

use std::fmt;

use super::DomainError;

/// Maximum length Heroku accepts for an app name.
pub const APP_NAME_MAX_LEN: usize = 30;

/// A validated Heroku app name.
///
/// Heroku app names start with a lowercase letter, end with a letter or
/// digit, and otherwise contain only lowercase letters, digits and dashes.
/// That makes them safe to embed in registry references and file names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AppName(String);

impl AppName {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let invalid = |reason| DomainError::InvalidAppName {
            name: raw.to_string(),
            reason,
        };

        if raw.is_empty() {
            return Err(invalid("name is empty"));
        }
        if raw.len() > APP_NAME_MAX_LEN {
            return Err(invalid("name is longer than 30 characters"));
        }
        if !raw
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(invalid(
                "only lowercase letters, digits and dashes are allowed",
            ));
        }
        if !raw.starts_with(|c: char| c.is_ascii_lowercase()) {
            return Err(invalid("name must start with a letter"));
        }
        if raw.ends_with('-') {
            return Err(invalid("name must end with a letter or digit"));
        }

        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AppName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AppName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
