use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Thumbs judgement attached to a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Thumbs {
    Up,
    Down,
}

/// Structured end-user judgement of a run
///
/// Every field is optional; keys this crate does not know about are kept in
/// `extra` so they survive a round trip.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Feedback {
    #[serde(
        default,
        deserialize_with = "crate::lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub thumbs: Option<String>,

    #[serde(
        default,
        deserialize_with = "crate::lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub rating: Option<f64>,

    #[serde(
        default,
        deserialize_with = "crate::lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub emoji: Option<String>,

    #[serde(
        default,
        deserialize_with = "crate::lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub comment: Option<String>,

    #[serde(
        default,
        deserialize_with = "crate::lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub retried: Option<bool>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Feedback {
    pub fn thumbs_up() -> Self {
        Self {
            thumbs: Some("up".to_string()),
            ..Default::default()
        }
    }

    pub fn thumbs_down() -> Self {
        Self {
            thumbs: Some("down".to_string()),
            ..Default::default()
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn thumbs(&self) -> Option<Thumbs> {
        match self.thumbs.as_deref() {
            Some("up") => Some(Thumbs::Up),
            Some("down") => Some(Thumbs::Down),
            _ => None,
        }
    }

    /// True when no field carries a judgement
    pub fn is_empty(&self) -> bool {
        self.thumbs().is_none()
            && self.rating.is_none()
            && self.emoji.as_deref().is_none_or(str::is_empty)
            && self.comment.as_deref().is_none_or(str::is_empty)
            && !self.retried.unwrap_or(false)
            && self.extra.is_empty()
    }
}
