// src/types/api_key.rs
//! Notion integration token newtype.

use crate::error::AppError;
use std::fmt;

/// API key for Notion API authentication.
///
/// Redacted in `Display` so it never leaks into logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Creates a new API key with format validation.
    pub fn new(key: impl Into<String>) -> Result<Self, AppError> {
        let key = key.into();

        if key.is_empty() {
            return Err(AppError::InvalidApiKey("API key cannot be empty".to_string()));
        }
        if !key.starts_with("secret_") && !key.starts_with("ntn_") {
            return Err(AppError::InvalidApiKey(
                "API key must start with 'secret_' or 'ntn_'".to_string(),
            ));
        }
        if key.len() < 20 {
            return Err(AppError::InvalidApiKey("API key is too short".to_string()));
        }

        Ok(Self(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Truncate on a character boundary; keys are not guaranteed ASCII.
        let prefix: String = self.0.chars().take(10).collect();
        write!(f, "{}...", prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_both_token_prefixes() {
        assert!(ApiKey::new("secret_abcdefghijklmnop").is_ok());
        assert!(ApiKey::new("ntn_abcdefghijklmnopqrst").is_ok());
    }

    #[test]
    fn rejects_malformed_keys() {
        assert!(ApiKey::new("").is_err());
        assert!(ApiKey::new("token_abcdefghijklmnop").is_err());
        assert!(ApiKey::new("secret_short").is_err());
    }

    #[test]
    fn display_redacts_the_key() {
        let key = ApiKey::new("secret_abcdefghijklmnop").unwrap();
        assert_eq!(key.to_string(), "secret_abc...");
    }

    #[test]
    fn display_handles_multibyte_keys() {
        let key = ApiKey::new("secret_ünïcödé_padding_x").unwrap();
        assert_eq!(key.to_string(), "secret_ünï...");
    }
}
