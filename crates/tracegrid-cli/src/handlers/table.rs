use std::sync::Arc;

use anyhow::{Context, Result};
use tracegrid_engine::columns::build_table;
use tracegrid_engine::{BlockingRelatedRuns, RelatedRuns, Table};
use tracegrid_runtime::load_runs;
use tracegrid_types::Run;

use crate::args::TableArgs;
use crate::context::ExecutionContext;
use crate::presentation::{ConsoleTableView, TableViewModel};
use crate::types::OutputFormat;

/// Runs from `args.runs` and a table built from flags and config
///
/// `related` decides how the feedback column reads related runs when
/// aggregation is enabled.
pub(crate) fn prepare<F>(
    ctx: &ExecutionContext,
    args: &TableArgs,
    related: F,
) -> Result<(Table, Vec<Run>)>
where
    F: FnOnce(&[Run]) -> Result<Option<Arc<dyn RelatedRuns>>>,
{
    let runs = load_runs(&args.runs)
        .with_context(|| format!("loading runs from {}", args.runs.display()))?;
    tracing::debug!(count = runs.len(), "loaded runs");

    let related = if ctx.related_enabled(args) {
        related(&runs)?
    } else {
        None
    };

    let choices = ctx.choices(args)?;
    let table = build_table(&choices, &ctx.table_options(args, related))?;
    Ok((table, runs))
}

pub fn handle(ctx: &ExecutionContext, args: &TableArgs, format: OutputFormat) -> Result<()> {
    let (table, mut runs) = prepare(ctx, args, |runs| {
        let source = ctx.related_source(args, runs)?;
        let related: Arc<dyn RelatedRuns> = Arc::new(BlockingRelatedRuns::new(source));
        Ok(Some(related))
    })?;

    if let Some(sort) = ctx.sort(args)? {
        table.sort_runs(&mut runs, &sort)?;
    }

    let render_ctx = ctx.render_context(args);
    let vm = TableViewModel::build(&table, &runs, &render_ctx);
    tracing::debug!(events = ?ctx.analytics().events(), "rendered table");

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&vm)?),
        OutputFormat::Plain => print!("{}", ConsoleTableView::new(&vm, false)),
        OutputFormat::Color => print!("{}", ConsoleTableView::new(&vm, true)),
    }

    Ok(())
}
