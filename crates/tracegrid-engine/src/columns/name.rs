use std::cmp::Ordering;

use tracegrid_types::{Run, RunStatus};

use super::{ColumnMeta, ColumnSpec};
use crate::cell::{Badge, BadgeColor, Cell, Tone};
use crate::context::RenderContext;

#[derive(Debug, Clone)]
pub struct NameColumn {
    meta: ColumnMeta,
}

/// Run name (or type) as an outline badge coloured by status
pub fn name_column(label: &str) -> NameColumn {
    NameColumn {
        meta: ColumnMeta::new("name", label).size(80).min_size(30),
    }
}

pub(crate) fn status_tone(status: Option<&RunStatus>) -> Tone {
    match status {
        Some(RunStatus::Success) => Tone::Positive,
        Some(RunStatus::Error) => Tone::Negative,
        _ => Tone::Neutral,
    }
}

impl ColumnSpec for NameColumn {
    type Value = String;

    fn meta(&self) -> &ColumnMeta {
        &self.meta
    }

    fn value(&self, run: &Run) -> Self::Value {
        run.label().to_string()
    }

    fn compare(&self, a: &Self::Value, b: &Self::Value) -> Option<Ordering> {
        Some(a.to_lowercase().cmp(&b.to_lowercase()))
    }

    fn render(&self, value: &Self::Value, run: &Run, _ctx: &RenderContext) -> Cell {
        if value.is_empty() {
            return Cell::Empty;
        }
        Cell::Badge(Badge::outline(
            value.clone(),
            BadgeColor::Tone(status_tone(run.status.as_ref())),
        ))
    }
}
