//! Column descriptors.
//!
//! Each factory function returns one immutable descriptor implementing
//! [`ColumnSpec`]. The blanket [`Column`] impl erases the value type so any
//! mix of descriptors fits in one [`Table`](crate::Table).

use std::cmp::Ordering;

use serde::Serialize;
use tracegrid_types::Run;

use crate::cell::Cell;
use crate::context::RenderContext;

pub mod catalog;
pub mod cost;
pub mod duration;
pub mod enrichment;
pub mod feedback;
pub mod name;
pub mod payload;
pub mod status;
pub mod tags;
pub mod template;
pub mod time;
pub mod user;

pub use catalog::{ColumnChoice, TableOptions, build_table, default_choices};
pub use cost::{CostColumn, cost_column};
pub use duration::{DurationColumn, DurationMode, DurationMs, duration_column};
pub use enrichment::{EnrichmentColumn, enrichment_column};
pub use feedback::{
    AggregatedFeedbackColumn, FeedbackEntry, SimpleFeedbackColumn, aggregated_feedback_column,
    feedback_column, render_feedback,
};
pub use name::{NameColumn, name_column};
pub use payload::{InputColumn, OutputColumn, input_column, output_column};
pub use status::{StatusColumn, status_column};
pub use tags::{HAS_TAGS_EVENT, TagsColumn, tags_column};
pub use template::{TemplateColumn, template_column};
pub use time::{TimeColumn, TimeField, time_column};
pub use user::{UserColumn, user_column};

/// Static description of a column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnMeta {
    /// Unique within a table
    pub id: String,
    pub header: String,
    /// Preferred width, in the host's units
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_size: Option<u16>,
    pub sortable: bool,
}

impl ColumnMeta {
    pub fn new(id: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            header: header.into(),
            size: None,
            min_size: None,
            sortable: true,
        }
    }

    pub fn size(mut self, size: u16) -> Self {
        self.size = Some(size);
        self
    }

    pub fn min_size(mut self, min_size: u16) -> Self {
        self.min_size = Some(min_size);
        self
    }

    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }
}

/// Typed column contract
pub trait ColumnSpec: Send + Sync {
    type Value;

    fn meta(&self) -> &ColumnMeta;

    /// Derive this column's value for a row. Must not fail.
    fn value(&self, run: &Run) -> Self::Value;

    /// Order two values; `None` marks a pair as unorderable.
    fn compare(&self, _a: &Self::Value, _b: &Self::Value) -> Option<Ordering> {
        None
    }

    fn render(&self, value: &Self::Value, run: &Run, ctx: &RenderContext) -> Cell;
}

/// Object-safe view of a [`ColumnSpec`]
pub trait Column: Send + Sync {
    fn meta(&self) -> &ColumnMeta;

    fn cell(&self, run: &Run, ctx: &RenderContext) -> Cell;

    /// Compare two rows by this column; `None` when not sortable or when
    /// either value is unorderable.
    fn compare_runs(&self, a: &Run, b: &Run) -> Option<Ordering>;
}

impl<T: ColumnSpec> Column for T {
    fn meta(&self) -> &ColumnMeta {
        ColumnSpec::meta(self)
    }

    fn cell(&self, run: &Run, ctx: &RenderContext) -> Cell {
        let value = self.value(run);
        self.render(&value, run, ctx)
    }

    fn compare_runs(&self, a: &Run, b: &Run) -> Option<Ordering> {
        if !ColumnSpec::meta(self).sortable {
            return None;
        }
        self.compare(&self.value(a), &self.value(b))
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{DateTime, TimeZone, Utc};
    use chrono_tz::Tz;
    use tracegrid_types::Run;

    use crate::context::RenderContext;
    use crate::format::Viewer;

    pub fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 2, 15, 0, 0).unwrap()
    }

    pub fn ctx() -> RenderContext {
        RenderContext::new(Viewer::new(now(), Tz::UTC, chrono::Locale::en_US))
    }

    pub fn run(id: &str) -> Run {
        Run::new(id, "llm", now() - chrono::Duration::minutes(5))
    }
}
