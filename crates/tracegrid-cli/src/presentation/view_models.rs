use serde::Serialize;
use tracegrid_engine::columns::ColumnChoice;
use tracegrid_engine::{ColumnMeta, RenderContext, RenderedRow, Table};
use tracegrid_types::Run;

/// Headers and rendered rows, ready for any view
#[derive(Debug, Clone, Serialize)]
pub struct TableViewModel {
    pub columns: Vec<ColumnMeta>,
    pub rows: Vec<RenderedRow>,
}

impl TableViewModel {
    pub fn build(table: &Table, runs: &[Run], ctx: &RenderContext) -> Self {
        Self {
            columns: table.columns().cloned().collect(),
            rows: table.render(runs, ctx),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ColumnListEntry {
    pub name: String,
    pub description: String,
}

impl ColumnListEntry {
    /// Every fixed column plus the enrichment pattern
    pub fn all() -> Vec<Self> {
        ColumnChoice::FIXED
            .iter()
            .chain(std::iter::once(&ColumnChoice::Enrichment("<kind>".to_string())))
            .map(|choice| Self {
                name: choice.to_string(),
                description: choice.description(),
            })
            .collect()
    }
}
