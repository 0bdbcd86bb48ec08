//! Prompt builders.
//!
//! Each builder validates its required field, then assembles the system and
//! user messages from an ordered list of line rules. A rule either yields a
//! line or nothing; the surviving lines are joined with newlines.

use crate::error::ValidationError;
use crate::input::{CopyInput, MomentsInput, VideoInput, XhsInput, non_blank};
use crate::message::{ChatMessage, CompletionRequest};
use crate::segment::SectionLabel;

/// A system/user message pair with its sampling parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptPair {
    /// Persona and instructions.
    pub system: String,
    /// The concrete task.
    pub user: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
}

impl PromptPair {
    /// Converts the pair into a request with one system then one user message.
    ///
    /// The model is left unset so the client's configured default applies.
    #[must_use]
    pub fn into_request(self) -> CompletionRequest {
        CompletionRequest::new(vec![
            ChatMessage::system(self.system),
            ChatMessage::user(self.user),
        ])
        .with_temperature(self.temperature)
        .with_max_tokens(self.max_tokens)
    }
}

/// Ordered line rules for one message.
#[derive(Debug, Default)]
struct PromptLines(Vec<String>);

impl PromptLines {
    fn new() -> Self {
        Self::default()
    }

    /// A line that is always present.
    fn line(mut self, line: impl Into<String>) -> Self {
        self.0.push(line.into());
        self
    }

    /// A line rendered from `value` when it is non-blank, skipped otherwise.
    fn optional(mut self, value: Option<&str>, render: impl FnOnce(&str) -> String) -> Self {
        if let Some(value) = non_blank(value) {
            self.0.push(render(value));
        }
        self
    }

    fn join(self) -> String {
        self.0.join("\n")
    }
}

fn required<'a>(
    value: Option<&'a str>,
    field: &'static str,
    message: &'static str,
) -> Result<&'a str, ValidationError> {
    non_blank(value).ok_or(ValidationError::MissingField { field, message })
}

/// Builds the prompt for generic short-form copy.
///
/// # Errors
///
/// Returns [`ValidationError::MissingField`] when `prompt` is blank.
pub fn build_copy(input: &CopyInput) -> Result<PromptPair, ValidationError> {
    let prompt = required(input.prompt.as_deref(), "prompt", "missing prompt")?;
    let length = input.length();

    let system = PromptLines::new()
        .line(
            "You are a professional copywriting assistant who specializes in short-form copy \
             such as social media notes, status captions and short-video scripts.",
        )
        .line(
            "Based on the user's requirements and key points, output the finished copy \
             directly, without any lead-in such as \"Here is the copy\".",
        )
        .optional(input.scene.as_deref(), |scene| {
            format!("Scene/platform preference: {scene}")
        })
        .optional(input.tone.as_deref(), |tone| format!("Tone/style: {tone}"))
        .optional(length.map(|l| l.descriptor()), |descriptor| {
            format!("Length: {descriptor}")
        })
        .join();

    Ok(PromptPair {
        system,
        user: prompt.to_string(),
        temperature: 0.7,
        max_tokens: 2048,
    })
}

/// Tone variants for social-media notes, selected by `versionIndex`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XhsTone {
    /// Version 1 and the default: a friend sharing honestly.
    Authentic,
    /// Version 2: puts the item and the experience up front.
    Showcase,
    /// Version 3: light and humorous.
    Playful,
}

impl XhsTone {
    /// Selects the tone for a version index; anything outside 1..=3 is 1.
    #[must_use]
    pub fn from_version(version_index: Option<i64>) -> Self {
        match version_index {
            Some(2) => Self::Showcase,
            Some(3) => Self::Playful,
            _ => Self::Authentic,
        }
    }

    /// Tone description placed in the system prompt.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Authentic => "natural and authentic, like a friend sharing",
            Self::Showcase => "product showcase, highlighting the item and the experience",
            Self::Playful => "lighthearted and humorous, with a few memes and a playful feel",
        }
    }
}

/// Builds the prompt for a social-media note.
///
/// # Errors
///
/// Returns [`ValidationError::MissingField`] when `outline` is blank.
pub fn build_xhs(input: &XhsInput) -> Result<PromptPair, ValidationError> {
    let outline = required(
        input.outline.as_deref(),
        "outline",
        "missing outline (note outline/key points)",
    )?;
    let tone = XhsTone::from_version(input.version_index);
    let note_type = non_blank(input.note_type.as_deref()).unwrap_or("other");

    let system = PromptLines::new()
        .line("You are an expert at writing viral Xiaohongshu notes.")
        .line(
            "Output only one ready-to-use note body: no title, no lead-in such as \
             \"Here is the copy\", and no hashtags of your own (tags are appended separately).",
        )
        .line(
            "Style: colloquial and internet-savvy, with generous line breaks that suit how \
             Xiaohongshu users read.",
        )
        .line(format!("Tone for this version: {}.", tone.description()))
        .join();

    let user = PromptLines::new()
        .line(format!("Note type: {note_type}"))
        .line(format!("Outline/key points: {outline}"))
        .optional(input.keywords.as_deref(), |keywords| {
            format!("Extra keywords (weave them in naturally): {keywords}")
        })
        .line("Output one complete note body directly.")
        .join();

    Ok(PromptPair {
        system,
        user,
        temperature: 0.75,
        max_tokens: 1024,
    })
}

/// Builds the prompt for a personal status caption.
///
/// # Errors
///
/// Returns [`ValidationError::MissingField`] when `outline` is blank.
pub fn build_moments(input: &MomentsInput) -> Result<PromptPair, ValidationError> {
    let outline = required(
        input.outline.as_deref(),
        "outline",
        "missing outline (what you want to express)",
    )?;
    let scene = non_blank(input.scene.as_deref()).unwrap_or("daily life");
    let persona = non_blank(input.persona.as_deref()).unwrap_or("natural");

    let system = PromptLines::new()
        .line("You are an expert at writing captions for WeChat Moments posts.")
        .line(
            "Output only one caption that can be posted as is: no title and no lead-in such \
             as \"Here is the caption\".",
        )
        .line(
            "Keep it natural, colloquial and personal. Line breaks and white space are \
             welcome, and you may end with 1-2 emoji.",
        )
        .line("Keep it moderate in length, not too long.")
        .join();

    let user = PromptLines::new()
        .line(format!("Scene: {scene}"))
        .line(format!("Persona/tone: {persona}"))
        .line(format!("What to express: {outline}"))
        .optional(input.festival.as_deref(), |festival| {
            format!("Festival/atmosphere: {festival}")
        })
        .optional(input.hot_topic.as_deref(), |topic| {
            format!("Tie in the trending topic: {topic}")
        })
        .line("Output one Moments caption directly.")
        .join();

    Ok(PromptPair {
        system,
        user,
        temperature: 0.75,
        max_tokens: 512,
    })
}

/// Builds the prompt for a short-video script.
///
/// The system prompt asks for the four sections that
/// [`segment_video_script`](crate::segment::segment_video_script) parses.
///
/// # Errors
///
/// Returns [`ValidationError::MissingField`] when `idea` is blank.
pub fn build_video(input: &VideoInput) -> Result<PromptPair, ValidationError> {
    let idea = required(
        input.idea.as_deref(),
        "idea",
        "missing idea (video topic/selling point)",
    )?;
    let platform = non_blank(input.platform.as_deref()).unwrap_or("Douyin");
    let hook_style = non_blank(input.hook_style.as_deref()).unwrap_or("pain-point resonance");

    let system = PromptLines::new()
        .line("You are an expert in short-video scripts and voiceover copy.")
        .line(
            "Structure your output under exactly the following four labels, in this order, \
             so it can be parsed:",
        )
        .line(format!(
            "{} One paragraph covering the 3-second opening hook, the core content and the \
             closing call to action.",
            SectionLabel::ScriptStructure.marker()
        ))
        .line(format!(
            "{} Spoken lines for the opening, the body and the closing, one or two short \
             sentences per segment.",
            SectionLabel::Voiceover.marker()
        ))
        .line(format!(
            "{} Describe each shot briefly as \"Shot 1\", \"Shot 2\" and so on.",
            SectionLabel::ShotList.marker()
        ))
        .line(format!(
            "{} Describe only the style and mood of the music, never a specific song title.",
            SectionLabel::BgmSuggestion.marker()
        ))
        .line(
            "Do not output any lead-in such as \"Here is the script\"; start directly with \
             the first label.",
        )
        .join();

    let user = PromptLines::new()
        .line(format!("Platform: {platform}"))
        .line(format!("Opening hook style (first 3 seconds): {hook_style}"))
        .line(format!("Video topic/selling point: {idea}"))
        .line(
            "Follow the system instructions and output: Script Structure, Voiceover, \
             Shot List, BGM Suggestion.",
        )
        .join();

    Ok(PromptPair {
        system,
        user,
        temperature: 0.7,
        max_tokens: 2048,
    })
}
