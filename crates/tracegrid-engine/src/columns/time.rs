use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use tracegrid_types::Run;

use super::{ColumnMeta, ColumnSpec};
use crate::cell::Cell;
use crate::context::RenderContext;
use crate::format::time_of_day_or_date;

/// Timestamp fields a time column can read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeField {
    CreatedAt,
    EndedAt,
}

impl TimeField {
    pub fn id(self) -> &'static str {
        match self {
            TimeField::CreatedAt => "createdAt",
            TimeField::EndedAt => "endedAt",
        }
    }

    fn read(self, run: &Run) -> Option<DateTime<Utc>> {
        match self {
            TimeField::CreatedAt => Some(run.created_at),
            TimeField::EndedAt => run.ended_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TimeColumn {
    meta: ColumnMeta,
    field: TimeField,
}

/// Timestamp column, ordered by instant; today's values show the time only
pub fn time_column(field: TimeField, label: &str) -> TimeColumn {
    TimeColumn {
        meta: ColumnMeta::new(field.id(), label).size(80),
        field,
    }
}

impl ColumnSpec for TimeColumn {
    type Value = Option<DateTime<Utc>>;

    fn meta(&self) -> &ColumnMeta {
        &self.meta
    }

    fn value(&self, run: &Run) -> Self::Value {
        self.field.read(run)
    }

    // Absent timestamps sort first
    fn compare(&self, a: &Self::Value, b: &Self::Value) -> Option<Ordering> {
        Some(a.cmp(b))
    }

    fn render(&self, value: &Self::Value, _run: &Run, ctx: &RenderContext) -> Cell {
        match value {
            Some(ts) => Cell::text(time_of_day_or_date(*ts, &ctx.viewer)),
            None => Cell::Empty,
        }
    }
}
