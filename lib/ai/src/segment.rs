//! Video-script response segmentation.
//!
//! The video prompt asks the model for four bracketed sections. The model
//! may drop, reorder or repeat them, so segmentation is a tolerant
//! left-to-right scan that never fails.

use serde::Serialize;

/// Used when the completion has no usable BGM section.
pub const FALLBACK_BGM_SUGGESTION: &str =
    "Choose background music whose rhythm and mood match the platform's style.";

/// A section label the video prompt asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionLabel {
    /// Overall structure of the video.
    ScriptStructure,
    /// Spoken narration.
    Voiceover,
    /// Shot-by-shot breakdown.
    ShotList,
    /// Background music mood and style.
    BgmSuggestion,
}

impl SectionLabel {
    /// All labels in prompt order.
    pub const ALL: [Self; 4] = [
        Self::ScriptStructure,
        Self::Voiceover,
        Self::ShotList,
        Self::BgmSuggestion,
    ];

    /// The bracketed marker as it appears in the completion.
    #[must_use]
    pub const fn marker(self) -> &'static str {
        match self {
            Self::ScriptStructure => "[Script Structure]",
            Self::Voiceover => "[Voiceover]",
            Self::ShotList => "[Shot List]",
            Self::BgmSuggestion => "[BGM Suggestion]",
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::ScriptStructure => 0,
            Self::Voiceover => 1,
            Self::ShotList => 2,
            Self::BgmSuggestion => 3,
        }
    }

    fn at_start_of(text: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|label| text.starts_with(label.marker()))
    }
}

/// Trimmed section bodies found in one completion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sections {
    bodies: [Option<String>; 4],
}

impl Sections {
    /// Scans `text` for section markers.
    ///
    /// A section runs from just after its marker to the next marker of any
    /// label, or to the end of the text. Only the first occurrence of each
    /// label is kept.
    #[must_use]
    pub fn scan(text: &str) -> Self {
        let mut sections = Self::default();
        let mut open: Option<SectionLabel> = None;
        let mut body_start = 0;
        let mut pos = 0;

        while let Some(rest) = text.get(pos..).filter(|rest| !rest.is_empty()) {
            if let Some(label) = SectionLabel::at_start_of(rest) {
                sections.close(open, &text[body_start..pos]);

                let slot = &mut sections.bodies[label.index()];
                open = if slot.is_none() {
                    *slot = Some(String::new());
                    Some(label)
                } else {
                    None
                };

                pos += label.marker().len();
                body_start = pos;
                continue;
            }

            pos += rest.chars().next().map_or(1, char::len_utf8);
        }

        sections.close(open, &text[body_start..]);
        sections
    }

    fn close(&mut self, open: Option<SectionLabel>, body: &str) {
        if let Some(label) = open {
            self.bodies[label.index()] = Some(body.trim().to_string());
        }
    }

    /// Returns the body of `label`, or `None` when the marker was absent.
    #[must_use]
    pub fn get(&self, label: SectionLabel) -> Option<&str> {
        self.bodies[label.index()].as_deref()
    }
}

/// Structured video-script response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoScriptResult {
    /// Script structure summary.
    pub outline: String,
    /// Voiceover followed by the shot list.
    pub script: String,
    /// Music mood and style.
    pub bgm_suggestion: String,
}

/// Splits a video-script completion into its result fields.
///
/// - `outline` falls back to the whole text when `[Script Structure]` is absent.
/// - `script` joins the voiceover and shot list with a blank line, skipping
///   empty ones, and falls back to the whole text when both are empty.
/// - `bgm_suggestion` falls back to [`FALLBACK_BGM_SUGGESTION`] when the
///   section is absent or empty.
#[must_use]
pub fn segment_video_script(text: &str) -> VideoScriptResult {
    let sections = Sections::scan(text);
    let whole = text.trim();

    let outline = sections
        .get(SectionLabel::ScriptStructure)
        .unwrap_or(whole)
        .to_string();

    let parts: Vec<&str> = [SectionLabel::Voiceover, SectionLabel::ShotList]
        .into_iter()
        .filter_map(|label| sections.get(label))
        .filter(|body| !body.is_empty())
        .collect();
    let script = if parts.is_empty() {
        whole.to_string()
    } else {
        parts.join("\n\n")
    };

    let bgm_suggestion = sections
        .get(SectionLabel::BgmSuggestion)
        .filter(|body| !body.is_empty())
        .unwrap_or(FALLBACK_BGM_SUGGESTION)
        .to_string();

    VideoScriptResult {
        outline,
        script,
        bgm_suggestion,
    }
}
