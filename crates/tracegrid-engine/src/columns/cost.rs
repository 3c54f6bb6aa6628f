use std::cmp::Ordering;

use tracegrid_types::Run;

use super::{ColumnMeta, ColumnSpec};
use crate::cell::Cell;
use crate::context::RenderContext;
use crate::format::format_cost;

#[derive(Debug, Clone)]
pub struct CostColumn {
    meta: ColumnMeta,
}

pub fn cost_column() -> CostColumn {
    CostColumn {
        meta: ColumnMeta::new("cost", "Cost").size(60),
    }
}

/// Numeric order with missing (or NaN) costs below every real amount
pub fn compare_costs(a: Option<f64>, b: Option<f64>) -> Ordering {
    let known = |cost: Option<f64>| cost.filter(|c| !c.is_nan());
    match (known(a), known(b)) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl ColumnSpec for CostColumn {
    type Value = Option<f64>;

    fn meta(&self) -> &ColumnMeta {
        &self.meta
    }

    fn value(&self, run: &Run) -> Self::Value {
        run.cost
    }

    fn compare(&self, a: &Self::Value, b: &Self::Value) -> Option<Ordering> {
        Some(compare_costs(*a, *b))
    }

    fn render(&self, value: &Self::Value, _run: &Run, ctx: &RenderContext) -> Cell {
        let text = format_cost(*value);
        if text.is_empty() {
            return Cell::Empty;
        }
        Cell::text(ctx.redactor.redact(&text))
    }
}
