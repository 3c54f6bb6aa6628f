use tracegrid_types::Run;

use super::{ColumnMeta, ColumnSpec};
use crate::cell::Cell;
use crate::context::RenderContext;

#[derive(Debug, Clone)]
pub struct TemplateColumn {
    meta: ColumnMeta,
}

/// Link to the prompt template a run was produced from
pub fn template_column() -> TemplateColumn {
    TemplateColumn {
        meta: ColumnMeta::new("templateVersionId", "Template").unsortable(),
    }
}

impl ColumnSpec for TemplateColumn {
    type Value = Option<String>;

    fn meta(&self) -> &ColumnMeta {
        &self.meta
    }

    fn value(&self, run: &Run) -> Self::Value {
        run.template_version_id.clone().filter(|id| !id.is_empty())
    }

    fn render(&self, value: &Self::Value, run: &Run, ctx: &RenderContext) -> Cell {
        let Some(version_id) = value else {
            return Cell::Empty;
        };

        let label = run
            .template_slug
            .clone()
            .filter(|slug| !slug.is_empty())
            .unwrap_or_else(|| version_id.clone());

        Cell::Link {
            label,
            route: ctx.navigator.template_route(version_id),
        }
    }
}
