//! Request extractors.

use axum::extract::{FromRef, FromRequest, FromRequestParts};
use axum::http::request::Parts;
use copywell_core::ApiKey;
use std::sync::Arc;

use crate::error::ApiError;
use crate::state::AppState;

/// Extractor for requiring a configured provider credential.
///
/// Runs before the body is read, so an unconfigured service answers 503
/// regardless of what was sent.
pub struct RequireCredential(pub ApiKey);

impl<S> FromRequestParts<S> for RequireCredential
where
    Arc<AppState>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = Arc::<AppState>::from_ref(state);
        app_state
            .api_key
            .clone()
            .map(RequireCredential)
            .ok_or(ApiError::NotConfigured)
    }
}

/// JSON body extractor whose rejections use the service's error shape.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);
