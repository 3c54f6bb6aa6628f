use std::cmp::Ordering;

use tracegrid_types::Run;

use super::{ColumnMeta, ColumnSpec};
use crate::cell::{Badge, BadgeColor, Cell, Tone};
use crate::context::RenderContext;

/// Emitted the first time a tagged row is rendered in a session
pub const HAS_TAGS_EVENT: &str = "HasTags";

#[derive(Debug, Clone)]
pub struct TagsColumn {
    meta: ColumnMeta,
}

pub fn tags_column() -> TagsColumn {
    TagsColumn {
        meta: ColumnMeta::new("tags", "Tags").size(70),
    }
}

impl ColumnSpec for TagsColumn {
    type Value = Vec<String>;

    fn meta(&self) -> &ColumnMeta {
        &self.meta
    }

    fn value(&self, run: &Run) -> Self::Value {
        run.tags.clone().unwrap_or_default()
    }

    fn compare(&self, a: &Self::Value, b: &Self::Value) -> Option<Ordering> {
        Some(a.cmp(b))
    }

    fn render(&self, value: &Self::Value, _run: &Run, ctx: &RenderContext) -> Cell {
        if value.is_empty() {
            return Cell::Empty;
        }

        ctx.analytics.track_once(HAS_TAGS_EVENT);

        Cell::group(
            value
                .iter()
                .map(|tag| Cell::Badge(Badge::outline(tag.clone(), BadgeColor::Tone(Tone::Accent))))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::{AnalyticsSink, SessionAnalytics};
    use crate::columns::Column;
    use crate::columns::test_support::{ctx, run};
    use std::sync::Arc;

    fn tagged(tags: &[&str]) -> Run {
        let mut row = run("r1");
        row.tags = Some(tags.iter().map(|t| t.to_string()).collect());
        row
    }

    #[test]
    fn test_one_badge_per_tag() {
        let cell = tags_column().cell(&tagged(&["prod", "beta"]), &ctx());
        let Cell::Group { items } = cell else {
            panic!("expected group");
        };
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].plain_text(), "beta");
    }

    #[test]
    fn test_absent_tags_render_nothing_and_do_not_track() {
        let analytics = Arc::new(SessionAnalytics::new());
        let ctx = ctx().with_analytics(analytics.clone());

        assert_eq!(tags_column().cell(&run("r1"), &ctx), Cell::Empty);
        assert_eq!(tags_column().cell(&tagged(&[]), &ctx), Cell::Empty);
        assert!(!analytics.has_seen(HAS_TAGS_EVENT));
    }

    #[test]
    fn test_has_tags_fires_once_per_session() {
        let analytics = Arc::new(SessionAnalytics::new());
        let ctx = ctx().with_analytics(analytics.clone());
        let column = tags_column();

        column.cell(&tagged(&["prod"]), &ctx);
        assert!(analytics.has_seen(HAS_TAGS_EVENT));
        // A second render must not register a new event
        assert!(!analytics.track_once(HAS_TAGS_EVENT));
        column.cell(&tagged(&["beta"]), &ctx);
        assert_eq!(analytics.events(), vec![HAS_TAGS_EVENT]);
    }
}
