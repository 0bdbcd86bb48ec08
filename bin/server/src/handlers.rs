//! Endpoint handlers.
//!
//! Each generation handler checks the credential, validates and builds the
//! prompt, makes the single provider call and shapes the response.
//! Validation failures never reach the provider.

use axum::Json;
use axum::extract::State;
use copywell_ai::{
    CopyInput, MomentsInput, PromptPair, ValidationError, VideoInput, VideoScriptResult, XhsInput,
    build_copy, build_moments, build_video, build_xhs, segment_video_script,
};
use copywell_core::{ApiKey, GenerationId};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, instrument};

use crate::error::ApiError;
use crate::extract::{JsonBody, RequireCredential};
use crate::state::{AppState, SERVICE_NAME};

/// Health check body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Always `true` while the process is serving.
    pub ok: bool,
    /// Service name.
    pub service: &'static str,
    /// Whether a provider credential is configured.
    pub deepseek_configured: bool,
}

/// Body of the plain-text generation endpoints.
#[derive(Debug, Serialize)]
pub struct TextResponse {
    /// Trimmed completion text.
    pub text: String,
}

/// GET /api/health
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        service: SERVICE_NAME,
        deepseek_configured: state.is_configured(),
    })
}

/// POST /api/ai/copy
#[instrument(skip_all, fields(endpoint = "/api/ai/copy", generation_id = %GenerationId::new()))]
pub async fn copy(
    State(state): State<Arc<AppState>>,
    RequireCredential(key): RequireCredential,
    JsonBody(input): JsonBody<CopyInput>,
) -> Result<Json<TextResponse>, ApiError> {
    let prompt = build_copy(&input).inspect_err(log_rejection)?;
    let text = generate(&state, &key, "/api/ai/copy", prompt).await?;
    Ok(Json(TextResponse { text }))
}

/// POST /api/ai/xhs
#[instrument(skip_all, fields(endpoint = "/api/ai/xhs", generation_id = %GenerationId::new()))]
pub async fn xhs(
    State(state): State<Arc<AppState>>,
    RequireCredential(key): RequireCredential,
    JsonBody(input): JsonBody<XhsInput>,
) -> Result<Json<TextResponse>, ApiError> {
    let prompt = build_xhs(&input).inspect_err(log_rejection)?;
    let text = generate(&state, &key, "/api/ai/xhs", prompt).await?;
    Ok(Json(TextResponse { text }))
}

/// POST /api/ai/moments
#[instrument(skip_all, fields(endpoint = "/api/ai/moments", generation_id = %GenerationId::new()))]
pub async fn moments(
    State(state): State<Arc<AppState>>,
    RequireCredential(key): RequireCredential,
    JsonBody(input): JsonBody<MomentsInput>,
) -> Result<Json<TextResponse>, ApiError> {
    let prompt = build_moments(&input).inspect_err(log_rejection)?;
    let text = generate(&state, &key, "/api/ai/moments", prompt).await?;
    Ok(Json(TextResponse { text }))
}

/// POST /api/ai/video
#[instrument(skip_all, fields(endpoint = "/api/ai/video", generation_id = %GenerationId::new()))]
pub async fn video(
    State(state): State<Arc<AppState>>,
    RequireCredential(key): RequireCredential,
    JsonBody(input): JsonBody<VideoInput>,
) -> Result<Json<VideoScriptResult>, ApiError> {
    let prompt = build_video(&input).inspect_err(log_rejection)?;
    let text = generate(&state, &key, "/api/ai/video", prompt).await?;
    Ok(Json(segment_video_script(&text)))
}

fn log_rejection(err: &ValidationError) {
    debug!(field = err.field(), reason = %err, "Rejected generation request");
}

async fn generate(
    state: &AppState,
    key: &ApiKey,
    endpoint: &'static str,
    prompt: PromptPair,
) -> Result<String, ApiError> {
    let request = prompt.into_request();
    state
        .backend
        .complete(key, &request)
        .await
        .map_err(|report| {
            let message = report.current_context().to_string();
            error!(endpoint, error = %message, "Generation failed");
            ApiError::generation(message)
        })
}
