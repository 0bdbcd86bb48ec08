//! Shared application state.

use copywell_ai::CompletionBackend;
use copywell_core::ApiKey;
use std::sync::Arc;

/// Service name reported by the health endpoint.
pub const SERVICE_NAME: &str = "copywell";

/// Immutable state shared by all handlers.
pub struct AppState {
    /// Provider client.
    pub backend: Arc<dyn CompletionBackend>,
    /// Provider credential; `None` disables the AI endpoints.
    pub api_key: Option<ApiKey>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(backend: Arc<dyn CompletionBackend>, api_key: Option<ApiKey>) -> Self {
        Self { backend, api_key }
    }

    /// Whether a provider credential is configured.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}
