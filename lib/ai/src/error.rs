//! Error types for the AI crate.
//!
//! - `CompletionError`: failures of the provider call, reported as
//!   `Report<CompletionError>` by the completion client
//! - `ValidationError`: rejected user input, raised by the prompt builders
//!   before any provider call is made

use std::fmt;

/// Errors from the completion client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionError {
    /// Provider answered with a non-success status.
    Provider { message: String },
    /// Provider answered successfully but without usable text.
    EmptyCompletion,
    /// The request never produced a provider response.
    Transport { reason: String },
    /// The request was rejected locally before sending.
    InvalidRequest { reason: String },
}

impl fmt::Display for CompletionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Provider { message } => write!(f, "DeepSeek API error: {message}"),
            Self::EmptyCompletion => write!(f, "DeepSeek API returned empty content"),
            Self::Transport { reason } => write!(f, "DeepSeek API request failed: {reason}"),
            Self::InvalidRequest { reason } => {
                write!(f, "invalid completion request: {reason}")
            }
        }
    }
}

impl std::error::Error for CompletionError {}

/// Errors from validating generation input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field was absent or blank.
    MissingField {
        /// JSON name of the field.
        field: &'static str,
        /// Message returned to the caller.
        message: &'static str,
    },
}

impl ValidationError {
    /// Returns the JSON name of the offending field.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingField { field, .. } => field,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField { message, .. } => f.write_str(message),
        }
    }
}

impl std::error::Error for ValidationError {}
