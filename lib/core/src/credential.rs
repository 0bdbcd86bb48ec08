//! Provider credential wrapper.

use secrecy::{ExposeSecret, SecretString};

/// Secret API key for the model provider.
///
/// The key is held in a [`SecretString`], so `Debug` output is redacted.
#[derive(Debug, Clone)]
pub struct ApiKey(SecretString);

impl ApiKey {
    /// Wraps a key, returning `None` when it is empty or whitespace-only.
    #[must_use]
    pub fn new(key: &str) -> Option<Self> {
        let trimmed = key.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(SecretString::from(trimmed)))
        }
    }

    /// Wraps an already-secret key from configuration.
    #[must_use]
    pub fn from_secret(key: &SecretString) -> Option<Self> {
        Self::new(key.expose_secret())
    }

    /// Formats the value of a bearer authorization header.
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0.expose_secret())
    }
}
