use std::cmp::Ordering;

use tracegrid_types::{Run, RunStatus};

use super::{ColumnMeta, ColumnSpec};
use crate::cell::{Badge, Cell, Tone};
use crate::context::RenderContext;

#[derive(Debug, Clone)]
pub struct StatusColumn {
    meta: ColumnMeta,
}

/// Status badge: green for `success`, alert colour for everything else
pub fn status_column() -> StatusColumn {
    StatusColumn {
        meta: ColumnMeta::new("status", "Status").size(60),
    }
}

impl ColumnSpec for StatusColumn {
    type Value = Option<RunStatus>;

    fn meta(&self) -> &ColumnMeta {
        &self.meta
    }

    fn value(&self, run: &Run) -> Self::Value {
        run.status.clone()
    }

    fn compare(&self, a: &Self::Value, b: &Self::Value) -> Option<Ordering> {
        Some(
            a.as_ref()
                .map(RunStatus::as_str)
                .cmp(&b.as_ref().map(RunStatus::as_str)),
        )
    }

    fn render(&self, value: &Self::Value, _run: &Run, ctx: &RenderContext) -> Cell {
        let Some(status) = value else {
            return Cell::Empty;
        };
        let tone = if status.is_success() {
            Tone::Positive
        } else {
            Tone::Negative
        };
        Cell::Badge(Badge::filled(ctx.redactor.redact(status.as_str()), tone))
    }
}
