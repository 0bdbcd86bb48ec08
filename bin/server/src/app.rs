//! Router assembly.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Largest accepted JSON body.
pub const JSON_BODY_LIMIT: usize = 1024 * 1024;

/// Method, path and description of every route, for startup logging.
pub const ROUTES: &[(&str, &str, &str)] = &[
    ("GET", "/api/health", "health check"),
    ("POST", "/api/ai/copy", "generic copy"),
    ("POST", "/api/ai/xhs", "social-media note"),
    ("POST", "/api/ai/moments", "status caption"),
    ("POST", "/api/ai/video", "short-video script"),
];

/// Builds the service router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/ai/copy", post(handlers::copy))
        .route("/api/ai/xhs", post(handlers::xhs))
        .route("/api/ai/moments", post(handlers::moments))
        .route("/api/ai/video", post(handlers::video))
        .layer(DefaultBodyLimit::max(JSON_BODY_LIMIT))
        .layer(CorsLayer::very_permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
