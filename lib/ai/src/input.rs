//! Generation input as submitted by callers.
//!
//! Every text field is optional at the wire level; a value that is not a
//! JSON string is treated as absent. Required fields are enforced by the
//! prompt builders.

use serde::{Deserialize, Deserializer};
use serde_json::Value as JsonValue;

/// Input for generic copy.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyInput {
    /// What the copy should say. Required.
    #[serde(default, deserialize_with = "lenient_string")]
    pub prompt: Option<String>,
    /// Scene or platform preference.
    #[serde(default, deserialize_with = "lenient_string")]
    pub scene: Option<String>,
    /// Tone or style.
    #[serde(default, deserialize_with = "lenient_string")]
    pub tone: Option<String>,
    /// `short`, `medium` or `long`.
    #[serde(default, deserialize_with = "lenient_string")]
    pub length: Option<String>,
}

/// Requested copy length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyLength {
    /// `short`
    Short,
    /// `medium`, also used for unrecognized values
    Medium,
    /// `long`
    Long,
}

impl CopyLength {
    /// Parses a length, treating anything unrecognized as `Medium`.
    #[must_use]
    pub fn parse_lenient(value: &str) -> Self {
        match value {
            "short" => Self::Short,
            "long" => Self::Long,
            _ => Self::Medium,
        }
    }

    /// Natural-language descriptor used in the prompt.
    #[must_use]
    pub fn descriptor(self) -> &'static str {
        match self {
            Self::Short => "brief",
            Self::Medium => "moderate",
            Self::Long => "somewhat longer",
        }
    }
}

impl CopyInput {
    /// Returns the requested length, if one was supplied.
    #[must_use]
    pub fn length(&self) -> Option<CopyLength> {
        non_blank(self.length.as_deref()).map(CopyLength::parse_lenient)
    }
}

/// Input for a social-media note.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XhsInput {
    /// Kind of note, e.g. review or tutorial.
    #[serde(default, deserialize_with = "lenient_string")]
    pub note_type: Option<String>,
    /// Outline or key points. Required.
    #[serde(default, deserialize_with = "lenient_string")]
    pub outline: Option<String>,
    /// Keywords to weave in.
    #[serde(default, deserialize_with = "lenient_string")]
    pub keywords: Option<String>,
    /// Which of the three tone variants to write.
    #[serde(default, deserialize_with = "lenient_integer")]
    pub version_index: Option<i64>,
}

/// Input for a personal status caption.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MomentsInput {
    /// Where the moment happens.
    #[serde(default, deserialize_with = "lenient_string")]
    pub scene: Option<String>,
    /// Persona or voice.
    #[serde(default, deserialize_with = "lenient_string")]
    pub persona: Option<String>,
    /// What the caption should express. Required.
    #[serde(default, deserialize_with = "lenient_string")]
    pub outline: Option<String>,
    /// Festival or atmosphere.
    #[serde(default, deserialize_with = "lenient_string")]
    pub festival: Option<String>,
    /// Trending topic to tie in.
    #[serde(default, deserialize_with = "lenient_string")]
    pub hot_topic: Option<String>,
}

/// Input for a short-video script.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoInput {
    /// Target platform.
    #[serde(default, deserialize_with = "lenient_string")]
    pub platform: Option<String>,
    /// Style of the opening hook.
    #[serde(default, deserialize_with = "lenient_string")]
    pub hook_style: Option<String>,
    /// Video topic or selling point. Required.
    #[serde(default, deserialize_with = "lenient_string")]
    pub idea: Option<String>,
}

/// Trims a value and drops it when nothing is left.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<JsonValue>::deserialize(deserializer)? {
        Some(JsonValue::String(s)) => Some(s),
        _ => None,
    })
}

fn lenient_integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<JsonValue>::deserialize(deserializer)? {
        Some(JsonValue::Number(n)) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        _ => None,
    })
}
