//! HTTP error responses.
//!
//! Every failure leaves the service as `{"message": "..."}` with a non-2xx
//! status. Provider details beyond the top-level message are only logged.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use copywell_ai::ValidationError;
use serde::Serialize;
use std::fmt;

/// Message used when a failure has nothing more specific to say.
pub const GENERIC_FAILURE: &str = "generation failed";

/// Errors returned by the HTTP handlers.
#[derive(Debug)]
pub enum ApiError {
    /// No provider credential is configured.
    NotConfigured,
    /// A required field was missing or blank.
    Validation(ValidationError),
    /// The provider call failed.
    Generation { message: String },
    /// The request body could not be read as JSON.
    Rejected { status: StatusCode, message: String },
}

impl ApiError {
    /// Builds a generation failure, substituting a generic message for an
    /// empty one.
    #[must_use]
    pub fn generation(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            Self::Generation {
                message: GENERIC_FAILURE.to_string(),
            }
        } else {
            Self::Generation { message }
        }
    }

    /// HTTP status for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Generation { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Rejected { status, .. } => *status,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConfigured => write!(
                f,
                "service is not configured: set DEEPSEEK_API_KEY in the environment or .env file"
            ),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Generation { message } => f.write_str(message),
            Self::Rejected { message, .. } => f.write_str(message),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
