use tracegrid_types::{Enrichment, Run};

use super::{ColumnMeta, ColumnSpec};
use crate::cell::Cell;
use crate::context::RenderContext;
use crate::enrichment::render_enrichment;
use crate::format::capitalize;

#[derive(Debug, Clone)]
pub struct EnrichmentColumn {
    meta: ColumnMeta,
    kind: String,
}

/// Column showing `metadata.enrichment[kind]`
pub fn enrichment_column(kind: &str) -> EnrichmentColumn {
    EnrichmentColumn {
        meta: ColumnMeta::new(format!("enrichment-{kind}"), format!("{} ✨", capitalize(kind)))
            .size(100)
            .unsortable(),
        kind: kind.to_string(),
    }
}

impl EnrichmentColumn {
    pub fn kind(&self) -> &str {
        &self.kind
    }
}

impl ColumnSpec for EnrichmentColumn {
    type Value = Option<Enrichment>;

    fn meta(&self) -> &ColumnMeta {
        &self.meta
    }

    fn value(&self, run: &Run) -> Self::Value {
        run.enrichment(&self.kind)
    }

    fn render(&self, value: &Self::Value, _run: &Run, ctx: &RenderContext) -> Cell {
        let Some(enrichment) = value else {
            return Cell::Empty;
        };

        let rendered = render_enrichment(enrichment, &*ctx.palette);
        match rendered.tooltip {
            Some(tooltip) if !rendered.visual.is_empty() => Cell::Tooltip {
                content: Box::new(rendered.visual),
                tooltip,
            },
            _ => rendered.visual,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Glyph;
    use crate::columns::Column;
    use crate::columns::test_support::{ctx, run};
    use serde_json::json;

    fn enriched(enrichment: serde_json::Value) -> Run {
        let mut row = run("r1");
        row.metadata = json!({ "enrichment": enrichment }).as_object().cloned();
        row
    }

    #[test]
    fn test_header_and_id() {
        let column = enrichment_column("sentiment");
        let meta = ColumnSpec::meta(&column);
        assert_eq!(meta.id, "enrichment-sentiment");
        assert_eq!(meta.header, "Sentiment ✨");
        assert!(!meta.sortable);
    }

    #[test]
    fn test_absent_kind_renders_nothing() {
        let row = enriched(json!({ "topics": ["a"] }));
        assert_eq!(enrichment_column("sentiment").cell(&row, &ctx()), Cell::Empty);
        assert_eq!(enrichment_column("sentiment").cell(&run("r2"), &ctx()), Cell::Empty);
    }

    #[test]
    fn test_tooltip_wraps_visual() {
        let row = enriched(json!({ "sentiment": -0.9 }));
        let cell = enrichment_column("sentiment").cell(&row, &ctx());
        assert_eq!(cell.tooltip(), Some("Sentiment: negative"));
        assert_eq!(cell.plain_text(), "🙁 -0.9");
    }

    #[test]
    fn test_pii_has_no_tooltip() {
        let row = enriched(json!({ "pii": "none" }));
        let cell = enrichment_column("pii").cell(&row, &ctx());
        assert_eq!(
            cell,
            Cell::Glyph {
                glyph: Glyph::Clear,
                tone: crate::cell::Tone::Neutral,
            }
        );
    }

    #[test]
    fn test_unknown_kind_uses_kind_as_tooltip() {
        let row = enriched(json!({ "language": "de" }));
        let cell = enrichment_column("language").cell(&row, &ctx());
        assert_eq!(cell.tooltip(), Some("language"));
        assert_eq!(cell.plain_text(), "de");
    }
}
