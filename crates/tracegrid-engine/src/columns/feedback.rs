//! Feedback columns.
//!
//! [`SimpleFeedbackColumn`] is pure and reads the row alone.
//! [`AggregatedFeedbackColumn`] also shows feedback left on related runs and
//! therefore depends on a [`RelatedRuns`] lookup, which may perform I/O.
//! Both render through [`render_feedback`].

use std::sync::Arc;

use tracegrid_types::{Feedback, Run};

use super::{ColumnMeta, ColumnSpec};
use crate::cell::{Cell, FeedbackChip};
use crate::context::RenderContext;
use crate::related::{Lookup, RelatedRuns};

/// Feedback shown for a row, tagged with the run it came from
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackEntry {
    pub run_id: String,
    pub feedback: Feedback,
    /// Taken from `parentFeedback` because the run has none of its own
    pub inherited: bool,
}

fn feedback_meta() -> ColumnMeta {
    ColumnMeta::new("feedback", "Feedback").size(100).unsortable()
}

/// Own feedback, else inherited parent feedback, else nothing
fn own_or_inherited(run: &Run) -> Option<FeedbackEntry> {
    if let Some(feedback) = &run.feedback {
        return Some(FeedbackEntry {
            run_id: run.id.clone(),
            feedback: feedback.clone(),
            inherited: false,
        });
    }
    run.parent_feedback.as_ref().map(|feedback| FeedbackEntry {
        run_id: run.id.clone(),
        feedback: feedback.clone(),
        inherited: true,
    })
}

/// One chip per entry, in order
pub fn render_feedback(entries: &[FeedbackEntry]) -> Cell {
    let mut chips: Vec<Cell> = entries
        .iter()
        .map(|entry| {
            Cell::Feedback(FeedbackChip {
                feedback: entry.feedback.clone(),
                inherited: entry.inherited,
            })
        })
        .collect();

    match chips.len() {
        0 => Cell::Empty,
        1 => chips.remove(0),
        _ => Cell::Group { items: chips },
    }
}

#[derive(Debug, Clone)]
pub struct SimpleFeedbackColumn {
    meta: ColumnMeta,
}

pub fn feedback_column() -> SimpleFeedbackColumn {
    SimpleFeedbackColumn {
        meta: feedback_meta(),
    }
}

impl ColumnSpec for SimpleFeedbackColumn {
    type Value = Option<FeedbackEntry>;

    fn meta(&self) -> &ColumnMeta {
        &self.meta
    }

    fn value(&self, run: &Run) -> Self::Value {
        own_or_inherited(run)
    }

    fn render(&self, value: &Self::Value, _run: &Run, _ctx: &RenderContext) -> Cell {
        render_feedback(value.as_slice())
    }
}

pub struct AggregatedFeedbackColumn {
    meta: ColumnMeta,
    related: Arc<dyn RelatedRuns>,
}

/// Feedback of the row and of every related run that carries feedback
///
/// Order is the row's own feedback first, then related runs in the order the
/// lookup returned them. Until the lookup resolves, and if it fails, the cell
/// shows what [`feedback_column`] would.
pub fn aggregated_feedback_column(related: Arc<dyn RelatedRuns>) -> AggregatedFeedbackColumn {
    AggregatedFeedbackColumn {
        meta: feedback_meta(),
        related,
    }
}

impl AggregatedFeedbackColumn {
    fn aggregate(run: &Run, related: &[Run]) -> Vec<FeedbackEntry> {
        std::iter::once(run)
            .chain(related.iter().filter(|other| other.id != run.id))
            .filter_map(|source| {
                source.feedback.as_ref().map(|feedback| FeedbackEntry {
                    run_id: source.id.clone(),
                    feedback: feedback.clone(),
                    inherited: false,
                })
            })
            .collect()
    }
}

impl ColumnSpec for AggregatedFeedbackColumn {
    type Value = Vec<FeedbackEntry>;

    fn meta(&self) -> &ColumnMeta {
        &self.meta
    }

    fn value(&self, run: &Run) -> Self::Value {
        match self.related.lookup(run) {
            Lookup::Resolved(related) => Self::aggregate(run, &related),
            Lookup::Pending | Lookup::Failed => own_or_inherited(run).into_iter().collect(),
        }
    }

    fn render(&self, value: &Self::Value, _run: &Run, _ctx: &RenderContext) -> Cell {
        render_feedback(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::Column;
    use crate::columns::test_support::{ctx, run};

    struct Fixed(Lookup);

    impl RelatedRuns for Fixed {
        fn lookup(&self, _run: &Run) -> Lookup {
            self.0.clone()
        }
    }

    fn chip(feedback: Feedback, inherited: bool) -> Cell {
        Cell::Feedback(FeedbackChip {
            feedback,
            inherited,
        })
    }

    #[test]
    fn test_simple_own_feedback_is_not_flagged() {
        let mut row = run("r1");
        row.feedback = Some(Feedback::thumbs_up());
        row.parent_feedback = Some(Feedback::thumbs_down());

        assert_eq!(
            feedback_column().cell(&row, &ctx()),
            chip(Feedback::thumbs_up(), false)
        );
    }

    #[test]
    fn test_simple_falls_back_to_parent_feedback() {
        let mut row = run("r1");
        row.parent_feedback = Some(Feedback::thumbs_down());

        assert_eq!(
            feedback_column().cell(&row, &ctx()),
            chip(Feedback::thumbs_down(), true)
        );
    }

    #[test]
    fn test_simple_without_any_feedback_is_empty() {
        assert_eq!(feedback_column().cell(&run("r1"), &ctx()), Cell::Empty);
    }

    #[test]
    fn test_aggregated_keeps_only_runs_with_feedback() {
        let mut row = run("r1");
        row.feedback = Some(Feedback::thumbs_up());

        let mut with_feedback = run("r2");
        with_feedback.feedback = Some(Feedback::thumbs_down().with_comment("wrong"));
        let without_feedback = run("r3");

        let column = aggregated_feedback_column(Arc::new(Fixed(Lookup::Resolved(Arc::new(
            vec![without_feedback, with_feedback],
        )))));

        assert_eq!(
            column.cell(&row, &ctx()),
            Cell::Group {
                items: vec![
                    chip(Feedback::thumbs_up(), false),
                    chip(Feedback::thumbs_down().with_comment("wrong"), false),
                ],
            }
        );
    }

    #[test]
    fn test_aggregated_skips_row_echoed_by_source() {
        let mut row = run("r1");
        row.feedback = Some(Feedback::thumbs_up());

        let column = aggregated_feedback_column(Arc::new(Fixed(Lookup::Resolved(Arc::new(
            vec![row.clone()],
        )))));

        assert_eq!(column.value(&row).len(), 1);
    }

    #[test]
    fn test_aggregated_with_no_related_runs_shows_own() {
        let mut row = run("r1");
        row.feedback = Some(Feedback::thumbs_up());

        let column =
            aggregated_feedback_column(Arc::new(Fixed(Lookup::Resolved(Arc::new(Vec::new())))));
        assert_eq!(column.cell(&row, &ctx()), chip(Feedback::thumbs_up(), false));
    }

    #[test]
    fn test_aggregated_failure_falls_back_to_simple() {
        let mut row = run("r1");
        row.parent_feedback = Some(Feedback::thumbs_down());

        for lookup in [Lookup::Failed, Lookup::Pending] {
            let column = aggregated_feedback_column(Arc::new(Fixed(lookup)));
            assert_eq!(
                column.cell(&row, &ctx()),
                feedback_column().cell(&row, &ctx())
            );
        }
    }
}
