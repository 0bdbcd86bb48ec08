//! Content generation pipeline for copywell.
//!
//! This crate turns structured user input into a chat-completion request,
//! sends it to the model provider, and post-processes the reply:
//!
//! - **Prompt builders** map validated input to a system/user message pair
//!   and sampling parameters.
//! - **Completion client** performs the single provider call.
//! - **Segmenter** splits a video-script completion into labeled sections.

pub mod client;
pub mod error;
pub mod input;
pub mod message;
pub mod prompt;
pub mod segment;

pub use client::{CompletionBackend, DeepSeekClient};
pub use error::{CompletionError, ValidationError};
pub use input::{CopyInput, CopyLength, MomentsInput, VideoInput, XhsInput};
pub use message::{ChatMessage, CompletionRequest, MessageRole};
pub use prompt::{PromptPair, XhsTone, build_copy, build_moments, build_video, build_xhs};
pub use segment::{
    FALLBACK_BGM_SUGGESTION, SectionLabel, Sections, VideoScriptResult, segment_video_script,
};
