//! Analysis results attached to a run under `metadata.enrichment`.
//!
//! Each key of that object names an enrichment kind. Kinds with a known shape
//! parse into dedicated variants; everything else (including known kinds whose
//! value has an unexpected shape) is kept as `Unknown` with the raw value so
//! new upstream kinds still display.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const SENTIMENT: &str = "sentiment";
pub const PII: &str = "pii";
pub const TOPICS: &str = "topics";

/// PII classification of a run's content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PiiLevel {
    Soft,
    Hard,
    /// `"none"`, null, or any other value
    Clear,
}

impl PiiLevel {
    pub fn from_value(value: &Value) -> Self {
        match value.as_str() {
            Some("soft") => PiiLevel::Soft,
            Some("hard") => PiiLevel::Hard,
            _ => PiiLevel::Clear,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Enrichment {
    /// Score in `[-1, 1]`
    Sentiment(f64),
    Pii(PiiLevel),
    /// Topic labels in upstream order
    Topics(Vec<String>),
    Unknown { kind: String, value: Value },
}

impl Enrichment {
    pub fn from_entry(kind: &str, value: &Value) -> Self {
        match kind {
            SENTIMENT => match value.as_f64() {
                Some(score) => Enrichment::Sentiment(score),
                None => Enrichment::unknown(kind, value),
            },
            PII => Enrichment::Pii(PiiLevel::from_value(value)),
            TOPICS => match value {
                Value::Null => Enrichment::Topics(Vec::new()),
                Value::Array(items) => items
                    .iter()
                    .map(|item| item.as_str().map(str::to_string))
                    .collect::<Option<Vec<_>>>()
                    .map_or_else(|| Enrichment::unknown(kind, value), Enrichment::Topics),
                _ => Enrichment::unknown(kind, value),
            },
            _ => Enrichment::unknown(kind, value),
        }
    }

    fn unknown(kind: &str, value: &Value) -> Self {
        Enrichment::Unknown {
            kind: kind.to_string(),
            value: value.clone(),
        }
    }

    pub fn kind(&self) -> &str {
        match self {
            Enrichment::Sentiment(_) => SENTIMENT,
            Enrichment::Pii(_) => PII,
            Enrichment::Topics(_) => TOPICS,
            Enrichment::Unknown { kind, .. } => kind,
        }
    }
}
