use serde_json::Value;
use tracegrid_types::Run;

use super::{ColumnMeta, ColumnSpec};
use crate::cell::Cell;
use crate::context::RenderContext;

#[derive(Debug, Clone)]
pub struct InputColumn {
    meta: ColumnMeta,
}

#[derive(Debug, Clone)]
pub struct OutputColumn {
    meta: ColumnMeta,
}

/// Compact preview of the run input
pub fn input_column(label: &str) -> InputColumn {
    InputColumn {
        meta: ColumnMeta::new("input", label).size(200).unsortable(),
    }
}

/// Compact preview of the run output, or of its error when one was recorded
pub fn output_column(label: &str) -> OutputColumn {
    OutputColumn {
        meta: ColumnMeta::new("output", label).unsortable(),
    }
}

impl ColumnSpec for InputColumn {
    type Value = Option<Value>;

    fn meta(&self) -> &ColumnMeta {
        &self.meta
    }

    fn value(&self, run: &Run) -> Self::Value {
        run.input.clone()
    }

    fn render(&self, value: &Self::Value, _run: &Run, ctx: &RenderContext) -> Cell {
        ctx.payloads.view(value.as_ref(), None, true)
    }
}

impl ColumnSpec for OutputColumn {
    type Value = Option<Value>;

    fn meta(&self) -> &ColumnMeta {
        &self.meta
    }

    fn value(&self, run: &Run) -> Self::Value {
        run.output.clone()
    }

    fn render(&self, value: &Self::Value, run: &Run, ctx: &RenderContext) -> Cell {
        ctx.payloads.view(value.as_ref(), run.error.as_ref(), true)
    }
}
