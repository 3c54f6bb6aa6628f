use std::sync::Arc;

use anyhow::{Result, bail};
use is_terminal::IsTerminal;
use tracegrid_engine::RelatedRuns;
use tracegrid_runtime::RelatedRunsLoader;

use crate::args::TableArgs;
use crate::context::ExecutionContext;
use crate::presentation::tui::{TableApp, TuiTableView};

pub fn handle(ctx: &ExecutionContext, args: &TableArgs) -> Result<()> {
    if !std::io::stdout().is_terminal() {
        bail!("the interactive view needs a terminal; use `tracegrid table` for piped output");
    }

    let mut loader = None;
    let mut events = None;
    let (table, runs) = super::table::prepare(ctx, args, |runs| {
        let source = ctx.related_source(args, runs)?;
        let (started, rx) = RelatedRunsLoader::start(source)?;
        let started = Arc::new(started);
        loader = Some(started.clone());
        events = Some(rx);
        let related: Arc<dyn RelatedRuns> = started;
        Ok(Some(related))
    })?;

    let sort = ctx.sort(args)?;
    let app = TableApp::new(table, runs, ctx.render_context(args), sort, loader)?;
    TuiTableView::run(app, events)
}
