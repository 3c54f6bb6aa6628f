//! Fluent builders for run rows.

use chrono::{DateTime, Duration, Utc};
use serde_json::{Map, Value, json};
use tracegrid_types::{Feedback, Run, RunStatus, RunUser};

use crate::fixtures;

/// Builds a [`Run`] with sensible defaults
///
/// # Example
/// ```
/// use tracegrid_testing::RunBuilder;
///
/// let run = RunBuilder::new("r1").name("summarize").duration_ms(1500).build();
/// assert_eq!(run.duration_ms(), Some(1500));
/// ```
pub struct RunBuilder {
    run: Run,
}

impl RunBuilder {
    /// An `llm` run created five minutes before [`fixtures::now`]
    pub fn new(id: &str) -> Self {
        Self {
            run: Run::new(id, "llm", fixtures::now() - Duration::minutes(5)),
        }
    }

    pub fn run_type(mut self, run_type: &str) -> Self {
        self.run.run_type = run_type.to_string();
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.run.name = Some(name.to_string());
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.run.created_at = created_at;
        self
    }

    pub fn ended_at(mut self, ended_at: DateTime<Utc>) -> Self {
        self.run.ended_at = Some(ended_at);
        self
    }

    /// Sets `ended_at` relative to `created_at`
    pub fn duration_ms(mut self, ms: i64) -> Self {
        self.run.ended_at = Some(self.run.created_at + Duration::milliseconds(ms));
        self
    }

    pub fn status(mut self, status: &str) -> Self {
        self.run.status = Some(RunStatus::from(status));
        self
    }

    pub fn tags(mut self, tags: &[&str]) -> Self {
        self.run.tags = Some(tags.iter().map(|t| t.to_string()).collect());
        self
    }

    pub fn cost(mut self, cost: f64) -> Self {
        self.run.cost = Some(cost);
        self
    }

    pub fn input(mut self, input: Value) -> Self {
        self.run.input = Some(input);
        self
    }

    pub fn output(mut self, output: Value) -> Self {
        self.run.output = Some(output);
        self
    }

    pub fn error(mut self, error: Value) -> Self {
        self.run.error = Some(error);
        self
    }

    pub fn template(mut self, version_id: &str, slug: &str) -> Self {
        self.run.template_version_id = Some(version_id.to_string());
        self.run.template_slug = Some(slug.to_string());
        self
    }

    pub fn user(mut self, id: &str, name: &str) -> Self {
        let mut props = Map::new();
        props.insert("name".to_string(), json!(name));
        self.run.user = Some(RunUser {
            id: Some(id.to_string()),
            external_id: None,
            props: Some(props),
        });
        self
    }

    pub fn feedback(mut self, feedback: Feedback) -> Self {
        self.run.feedback = Some(feedback);
        self
    }

    pub fn parent_feedback(mut self, feedback: Feedback) -> Self {
        self.run.parent_feedback = Some(feedback);
        self
    }

    pub fn parent(mut self, parent_run_id: &str) -> Self {
        self.run.parent_run_id = Some(parent_run_id.to_string());
        self
    }

    /// Adds `metadata.enrichment.{kind} = value`
    pub fn enrichment(mut self, kind: &str, value: Value) -> Self {
        let metadata = self.run.metadata.get_or_insert_with(Map::new);
        let entry = metadata
            .entry("enrichment")
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(map) = entry {
            map.insert(kind.to_string(), value);
        }
        self
    }

    pub fn build(self) -> Run {
        self.run
    }
}
