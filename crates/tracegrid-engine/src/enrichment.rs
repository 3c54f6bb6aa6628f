//! Visuals for enrichment results.
//!
//! Known kinds get bespoke styling; [`Enrichment::Unknown`] passes the raw
//! value through so kinds added upstream display without code changes.

use serde_json::Value;
use tracegrid_types::{Enrichment, PiiLevel};

use crate::cell::{Badge, BadgeColor, Cell, Glyph, Tone};
use crate::palette::Palette;

/// Threshold beyond which a sentiment score leaves the neutral bucket
pub const SENTIMENT_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedEnrichment {
    pub visual: Cell,
    pub tooltip: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentBucket {
    Positive,
    Neutral,
    Negative,
}

impl SentimentBucket {
    pub fn of(score: f64) -> Self {
        if score > SENTIMENT_THRESHOLD {
            SentimentBucket::Positive
        } else if score < -SENTIMENT_THRESHOLD {
            SentimentBucket::Negative
        } else {
            SentimentBucket::Neutral
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SentimentBucket::Positive => "positive",
            SentimentBucket::Neutral => "neutral",
            SentimentBucket::Negative => "negative",
        }
    }

    fn glyph(self) -> (Glyph, Tone) {
        match self {
            SentimentBucket::Positive => (Glyph::Smile, Tone::Positive),
            SentimentBucket::Neutral => (Glyph::Neutral, Tone::Muted),
            SentimentBucket::Negative => (Glyph::Frown, Tone::Negative),
        }
    }
}

pub fn render_enrichment(enrichment: &Enrichment, palette: &dyn Palette) -> RenderedEnrichment {
    match enrichment {
        Enrichment::Sentiment(score) => {
            let bucket = SentimentBucket::of(*score);
            let (glyph, tone) = bucket.glyph();
            RenderedEnrichment {
                visual: Cell::group(vec![
                    Cell::Glyph { glyph, tone },
                    Cell::text(score.to_string()),
                ]),
                tooltip: Some(format!("Sentiment: {}", bucket.name())),
            }
        }
        Enrichment::Pii(level) => {
            let (glyph, tone) = match level {
                PiiLevel::Soft => (Glyph::Warning, Tone::Warning),
                PiiLevel::Hard => (Glyph::Block, Tone::Negative),
                PiiLevel::Clear => (Glyph::Clear, Tone::Neutral),
            };
            RenderedEnrichment {
                visual: Cell::Glyph { glyph, tone },
                tooltip: None,
            }
        }
        Enrichment::Topics(topics) => RenderedEnrichment {
            visual: Cell::group(
                topics
                    .iter()
                    .map(|topic| {
                        Cell::Badge(Badge::outline(
                            topic.clone(),
                            BadgeColor::Seed(palette.color_from_seed(topic)),
                        ))
                    })
                    .collect(),
            ),
            tooltip: Some("Topics".to_string()),
        },
        Enrichment::Unknown { kind, value } => RenderedEnrichment {
            visual: passthrough(value),
            tooltip: Some(kind.clone()),
        },
    }
}

fn passthrough(value: &Value) -> Cell {
    match value {
        Value::Null => Cell::Empty,
        Value::String(s) => Cell::text(s.clone()),
        other => Cell::text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::HashPalette;
    use serde_json::json;

    fn render(kind: &str, value: Value) -> RenderedEnrichment {
        render_enrichment(&Enrichment::from_entry(kind, &value), &HashPalette)
    }

    fn glyph_of(rendered: &RenderedEnrichment) -> Glyph {
        let cell = match &rendered.visual {
            Cell::Group { items } => &items[0],
            other => other,
        };
        match cell {
            Cell::Glyph { glyph, .. } => *glyph,
            other => panic!("expected glyph, got {other:?}"),
        }
    }

    #[test]
    fn test_sentiment_thresholds_are_exclusive() {
        let cases = [
            (0.5, Glyph::Neutral, "Sentiment: neutral"),
            (0.500001, Glyph::Smile, "Sentiment: positive"),
            (-0.5, Glyph::Neutral, "Sentiment: neutral"),
            (-0.500001, Glyph::Frown, "Sentiment: negative"),
            (0.0, Glyph::Neutral, "Sentiment: neutral"),
            (1.0, Glyph::Smile, "Sentiment: positive"),
            (-1.0, Glyph::Frown, "Sentiment: negative"),
        ];

        for (score, glyph, tooltip) in cases {
            let rendered = render("sentiment", json!(score));
            assert_eq!(glyph_of(&rendered), glyph, "score {score}");
            assert_eq!(rendered.tooltip.as_deref(), Some(tooltip), "score {score}");
        }
    }

    #[test]
    fn test_sentiment_shows_raw_value() {
        let rendered = render("sentiment", json!(0.8));
        assert_eq!(rendered.visual.plain_text(), "🙂 0.8");
    }

    #[test]
    fn test_pii_branches() {
        assert_eq!(glyph_of(&render("pii", json!("soft"))), Glyph::Warning);
        assert_eq!(glyph_of(&render("pii", json!("hard"))), Glyph::Block);
        assert_eq!(glyph_of(&render("pii", json!("none"))), Glyph::Clear);
        assert_eq!(glyph_of(&render("pii", json!("anything"))), Glyph::Clear);
        assert_eq!(glyph_of(&render("pii", json!(null))), Glyph::Clear);
        assert_eq!(render("pii", json!("soft")).tooltip, None);
    }

    #[test]
    fn test_topics_badges_use_seed_colors() {
        let rendered = render("topics", json!(["billing", "refunds"]));
        assert_eq!(rendered.tooltip.as_deref(), Some("Topics"));

        let Cell::Group { items } = &rendered.visual else {
            panic!("expected group");
        };
        assert_eq!(items.len(), 2);
        assert_eq!(
            items[0],
            Cell::Badge(Badge::outline(
                "billing",
                BadgeColor::Seed(HashPalette.color_from_seed("billing"))
            ))
        );
    }

    #[test]
    fn test_topic_color_is_deterministic() {
        let first = render("topics", json!(["billing"]));
        let second = render("topics", json!(["billing"]));
        assert_eq!(first.visual, second.visual);
    }

    #[test]
    fn test_empty_topics_render_nothing() {
        let rendered = render("topics", json!([]));
        assert_eq!(rendered.visual, Cell::Empty);
        assert_eq!(rendered.tooltip.as_deref(), Some("Topics"));
    }

    #[test]
    fn test_unknown_kind_passes_through() {
        let rendered = render("language", json!("fr"));
        assert_eq!(rendered.visual, Cell::text("fr"));
        assert_eq!(rendered.tooltip.as_deref(), Some("language"));

        let rendered = render("toxicity", json!({ "score": 0.1 }));
        assert_eq!(rendered.visual.plain_text(), "{\"score\":0.1}");
    }
}
