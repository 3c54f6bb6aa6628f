use std::cmp::Ordering;

use tracegrid_types::Run;

use super::{ColumnMeta, ColumnSpec};
use crate::cell::Cell;
use crate::context::RenderContext;
use crate::format::{format_seconds, ms_to_time};

/// Derived run duration in milliseconds
///
/// NaN is the "unavailable" sentinel for runs that have not ended: it never
/// compares with anything and renders as an empty cell.
#[derive(Debug, Clone, Copy)]
pub struct DurationMs(pub f64);

impl DurationMs {
    pub const UNAVAILABLE: DurationMs = DurationMs(f64::NAN);

    pub fn of(run: &Run) -> Self {
        match run.duration_ms() {
            Some(ms) => DurationMs(ms as f64),
            None => Self::UNAVAILABLE,
        }
    }

    pub fn is_available(self) -> bool {
        self.0.is_finite()
    }
}

impl PartialEq for DurationMs {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl PartialOrd for DurationMs {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DurationMode {
    /// `"1.53s"`
    #[default]
    Compact,
    /// `"1h 2m 3s"`
    Full,
}

#[derive(Debug, Clone)]
pub struct DurationColumn {
    meta: ColumnMeta,
    mode: DurationMode,
}

/// Duration from `createdAt` to `endedAt`
pub fn duration_column(mode: DurationMode) -> DurationColumn {
    DurationColumn {
        meta: ColumnMeta::new("duration", "Duration").size(45),
        mode,
    }
}

impl ColumnSpec for DurationColumn {
    type Value = DurationMs;

    fn meta(&self) -> &ColumnMeta {
        &self.meta
    }

    fn value(&self, run: &Run) -> Self::Value {
        DurationMs::of(run)
    }

    fn compare(&self, a: &Self::Value, b: &Self::Value) -> Option<Ordering> {
        a.partial_cmp(b)
    }

    fn render(&self, value: &Self::Value, _run: &Run, _ctx: &RenderContext) -> Cell {
        // Zero and the sentinel both render blank
        if !value.is_available() || value.0 == 0.0 {
            return Cell::Empty;
        }
        match self.mode {
            DurationMode::Compact => Cell::text(format_seconds(value.0)),
            DurationMode::Full => Cell::text(ms_to_time(value.0)),
        }
    }
}
