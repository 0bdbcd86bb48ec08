//! Centralized server configuration.
//!
//! Loaded once at startup via the `config` crate from environment variables
//! (after `.env` has been applied by `main`).

use copywell_ai::DeepSeekClient;
use copywell_core::ApiKey;
use secrecy::SecretString;
use serde::Deserialize;

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Interface to listen on.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// DeepSeek API key. AI endpoints answer 503 while this is unset.
    #[serde(default)]
    pub deepseek_api_key: Option<SecretString>,

    /// Base URL of the DeepSeek API.
    #[serde(default = "default_deepseek_base_url")]
    pub deepseek_base_url: String,

    /// Model used for every completion.
    #[serde(default = "default_deepseek_model")]
    pub deepseek_model: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_deepseek_base_url() -> String {
    DeepSeekClient::DEFAULT_BASE_URL.to_string()
}

fn default_deepseek_model() -> String {
    DeepSeekClient::DEFAULT_MODEL.to_string()
}

impl ServerConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is present but invalid.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::from_environment(config::Environment::default())
    }

    /// Loads configuration from the given environment source.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is present but invalid.
    pub fn from_environment(env: config::Environment) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(env.separator("__").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Returns the provider credential, if a non-blank one is configured.
    #[must_use]
    pub fn api_key(&self) -> Option<ApiKey> {
        self.deepseek_api_key.as_ref().and_then(ApiKey::from_secret)
    }

    /// Returns the `host:port` address to bind.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
