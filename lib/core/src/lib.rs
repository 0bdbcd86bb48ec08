//! Core types shared by the copywell crates.
//!
//! This crate provides the per-request generation identifier used for log
//! correlation and the provider credential wrapper.

pub mod credential;
pub mod id;

pub use credential::ApiKey;
pub use id::GenerationId;
