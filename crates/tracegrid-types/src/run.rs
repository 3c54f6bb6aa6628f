use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Enrichment, Error, Feedback, Result};

/// Execution status of a run
///
/// Upstream emits free-form strings; anything that is not `success` or
/// `error` is kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RunStatus {
    Success,
    Error,
    Other(String),
}

impl RunStatus {
    pub fn as_str(&self) -> &str {
        match self {
            RunStatus::Success => "success",
            RunStatus::Error => "error",
            RunStatus::Other(s) => s,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RunStatus::Success)
    }
}

impl From<String> for RunStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "success" => RunStatus::Success,
            "error" => RunStatus::Error,
            _ => RunStatus::Other(value),
        }
    }
}

impl From<&str> for RunStatus {
    fn from(value: &str) -> Self {
        RunStatus::from(value.to_string())
    }
}

impl From<RunStatus> for String {
    fn from(status: RunStatus) -> Self {
        match status {
            RunStatus::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// End user (actor) a run was recorded for
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunUser {
    #[serde(
        default,
        deserialize_with = "crate::lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,

    #[serde(
        default,
        deserialize_with = "crate::lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub external_id: Option<String>,

    /// Free-form display attributes (`name`, `email`, ...)
    #[serde(
        default,
        deserialize_with = "crate::lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub props: Option<Map<String, Value>>,
}

impl RunUser {
    /// Best human label: props.name, props.email, external id, then id
    pub fn display_name(&self) -> Option<&str> {
        let prop = |key: &str| {
            self.props
                .as_ref()
                .and_then(|props| props.get(key))
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
        };

        prop("name")
            .or_else(|| prop("email"))
            .or(self.external_id.as_deref())
            .or(self.id.as_deref())
    }
}

/// One logged execution event (a table row)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Run {
    pub id: String,

    pub created_at: DateTime<Utc>,

    /// `None` while the run is still in progress
    #[serde(
        default,
        deserialize_with = "crate::lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub ended_at: Option<DateTime<Utc>>,

    #[serde(
        default,
        deserialize_with = "crate::lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<RunStatus>,

    /// Classification used as a label when `name` is absent (`llm`, `chain`, ...)
    #[serde(rename = "type", default, deserialize_with = "crate::lenient::or_default")]
    pub run_type: String,

    #[serde(
        default,
        deserialize_with = "crate::lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,

    #[serde(
        default,
        deserialize_with = "crate::lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub tags: Option<Vec<String>>,

    #[serde(
        default,
        deserialize_with = "crate::lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub cost: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,

    /// Error payload recorded next to `output`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,

    #[serde(
        default,
        deserialize_with = "crate::lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub template_version_id: Option<String>,

    #[serde(
        default,
        deserialize_with = "crate::lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub template_slug: Option<String>,

    #[serde(
        default,
        deserialize_with = "crate::lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub user: Option<RunUser>,

    #[serde(
        default,
        deserialize_with = "crate::lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub feedback: Option<Feedback>,

    /// Feedback inherited from an ancestor run
    #[serde(
        default,
        deserialize_with = "crate::lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub parent_feedback: Option<Feedback>,

    #[serde(
        default,
        deserialize_with = "crate::lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub parent_run_id: Option<String>,

    #[serde(
        default,
        deserialize_with = "crate::lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub project_id: Option<String>,

    #[serde(
        default,
        deserialize_with = "crate::lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub metadata: Option<Map<String, Value>>,
}

impl Run {
    pub fn new(
        id: impl Into<String>,
        run_type: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            created_at,
            ended_at: None,
            status: None,
            run_type: run_type.into(),
            name: None,
            tags: None,
            cost: None,
            input: None,
            output: None,
            error: None,
            template_version_id: None,
            template_slug: None,
            user: None,
            feedback: None,
            parent_feedback: None,
            parent_run_id: None,
            project_id: None,
            metadata: None,
        }
    }

    /// Wall-clock duration in milliseconds, `None` while the run is open
    pub fn duration_ms(&self) -> Option<i64> {
        self.ended_at
            .map(|ended| ended.signed_duration_since(self.created_at).num_milliseconds())
    }

    /// `name`, falling back to `type`
    pub fn label(&self) -> &str {
        self.name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.run_type)
    }

    /// The `metadata.enrichment` object, if any
    pub fn enrichments(&self) -> Option<&Map<String, Value>> {
        self.metadata
            .as_ref()
            .and_then(|meta| meta.get("enrichment"))
            .and_then(Value::as_object)
    }

    /// Parsed enrichment for `kind`; `None` only when the key is absent
    pub fn enrichment(&self, kind: &str) -> Option<Enrichment> {
        self.enrichments()
            .and_then(|map| map.get(kind))
            .map(|value| Enrichment::from_entry(kind, value))
    }
}

/// Parse a run list from either a bare JSON array or an API page
/// (`{"data": [...]}`).
///
/// Rows are decoded one at a time. A row without a usable `id` or
/// `createdAt` is logged and skipped; the rest of the list still loads.
pub fn parse_runs(json: &str) -> Result<Vec<Run>> {
    let value: Value = serde_json::from_str(json)?;

    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(Error::Shape(
                    "expected an array of runs or an object with a `data` array".to_string(),
                ));
            }
        },
        other => {
            return Err(Error::Shape(format!(
                "expected an array of runs, found {}",
                json_kind(&other)
            )));
        }
    };

    let total = items.len();
    let runs: Vec<Run> = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<Run>(item) {
            Ok(run) => Some(run),
            Err(error) => {
                tracing::warn!(index, %error, "skipping malformed run");
                None
            }
        })
        .collect();

    if runs.len() < total {
        tracing::warn!(skipped = total - runs.len(), total, "some runs could not be read");
    }
    Ok(runs)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
