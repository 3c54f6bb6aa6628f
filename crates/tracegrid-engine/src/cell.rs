//! Cell view models.
//!
//! Columns produce [`Cell`] values; presenters (console, TUI, JSON) decide how
//! each variant looks. Cells carry semantic tones, never terminal colours.

use serde::Serialize;
use tracegrid_types::{Feedback, Thumbs};

use crate::palette::SeedColor;

/// Semantic colour of a piece of text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Positive,
    Negative,
    Neutral,
    Warning,
    Accent,
    Muted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum BadgeColor {
    Tone(Tone),
    Seed(SeedColor),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeVariant {
    #[default]
    Filled,
    Outline,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Badge {
    pub text: String,
    pub color: BadgeColor,
    pub variant: BadgeVariant,
}

impl Badge {
    pub fn filled(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            color: BadgeColor::Tone(tone),
            variant: BadgeVariant::Filled,
        }
    }

    pub fn outline(text: impl Into<String>, color: BadgeColor) -> Self {
        Self {
            text: text.into(),
            color,
            variant: BadgeVariant::Outline,
        }
    }
}

/// Icons cells can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Glyph {
    Smile,
    Frown,
    Neutral,
    Warning,
    Block,
    Clear,
}

impl Glyph {
    pub fn symbol(self) -> &'static str {
        match self {
            Glyph::Smile => "🙂",
            Glyph::Frown => "🙁",
            Glyph::Neutral => "😐",
            Glyph::Warning => "⚠️",
            Glyph::Block => "❌",
            Glyph::Clear => "❎",
        }
    }
}

/// One feedback judgement, possibly inherited from a parent run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackChip {
    pub feedback: Feedback,
    pub inherited: bool,
}

impl FeedbackChip {
    /// Glyph summary (`👍 ★4 💬 great answer`)
    pub fn summary(&self) -> String {
        let fb = &self.feedback;
        let mut parts: Vec<String> = Vec::new();

        match fb.thumbs() {
            Some(Thumbs::Up) => parts.push("👍".to_string()),
            Some(Thumbs::Down) => parts.push("👎".to_string()),
            None => {}
        }
        if let Some(rating) = fb.rating {
            parts.push(format!("★{rating}"));
        }
        if let Some(emoji) = fb.emoji.as_deref().filter(|e| !e.is_empty()) {
            parts.push(emoji.to_string());
        }
        if fb.retried.unwrap_or(false) {
            parts.push("🔁".to_string());
        }
        if let Some(comment) = fb.comment.as_deref().filter(|c| !c.is_empty()) {
            parts.push(format!("💬 {comment}"));
        }

        parts.join(" ")
    }

    pub fn tone(&self) -> Tone {
        match self.feedback.thumbs() {
            Some(Thumbs::Up) => Tone::Positive,
            Some(Thumbs::Down) => Tone::Negative,
            None => Tone::Neutral,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Cell {
    Empty,
    Text {
        text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        tone: Option<Tone>,
    },
    Badge(Badge),
    Glyph {
        glyph: Glyph,
        tone: Tone,
    },
    Group {
        items: Vec<Cell>,
    },
    Link {
        label: String,
        route: String,
    },
    Avatar {
        initials: String,
        name: String,
        color: SeedColor,
    },
    Feedback(FeedbackChip),
    /// Structured payload preview
    Payload {
        text: String,
        is_error: bool,
    },
    Tooltip {
        content: Box<Cell>,
        tooltip: String,
    },
}

impl Cell {
    /// Plain text cell; an empty string yields [`Cell::Empty`]
    pub fn text(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() {
            Cell::Empty
        } else {
            Cell::Text { text, tone: None }
        }
    }

    pub fn toned(text: impl Into<String>, tone: Tone) -> Self {
        Cell::Text {
            text: text.into(),
            tone: Some(tone),
        }
    }

    /// Group of cells; empty groups collapse to [`Cell::Empty`]
    pub fn group(items: Vec<Cell>) -> Self {
        if items.is_empty() {
            Cell::Empty
        } else {
            Cell::Group { items }
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Text rendering without colour, used for plain output and widths
    pub fn plain_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text { text, .. } => text.clone(),
            Cell::Badge(badge) => badge.text.clone(),
            Cell::Glyph { glyph, .. } => glyph.symbol().to_string(),
            Cell::Group { items } => items
                .iter()
                .map(Cell::plain_text)
                .filter(|text| !text.is_empty())
                .collect::<Vec<_>>()
                .join(" "),
            Cell::Link { label, .. } => label.clone(),
            Cell::Avatar { name, .. } => name.clone(),
            Cell::Feedback(chip) => {
                if chip.inherited {
                    format!("{} (parent)", chip.summary())
                } else {
                    chip.summary()
                }
            }
            Cell::Payload { text, .. } => text.clone(),
            Cell::Tooltip { content, .. } => content.plain_text(),
        }
    }

    /// Tooltip text, if this cell carries one
    pub fn tooltip(&self) -> Option<&str> {
        match self {
            Cell::Tooltip { tooltip, .. } => Some(tooltip),
            _ => None,
        }
    }
}
