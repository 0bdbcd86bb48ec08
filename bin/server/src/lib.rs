//! copywell HTTP service.
//!
//! Exposes the content-generation endpoints over JSON, validating input,
//! building prompts and calling the model provider through
//! [`copywell_ai::CompletionBackend`].

pub mod app;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod state;

pub use app::{ROUTES, router};
pub use config::ServerConfig;
pub use error::ApiError;
pub use state::AppState;
