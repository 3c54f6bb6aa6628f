use std::sync::Arc;

use ratatui::widgets::TableState;
use tracegrid_engine::{
    ColumnMeta, RenderContext, RenderedRow, SortDirection, SortSpec, Table,
    TableError,
};
use tracegrid_runtime::{LoaderEvent, RelatedRunsLoader};
use tracegrid_types::Run;

/// Interactive table state: rows in display order, selection and sort
pub struct TableApp {
    table: Table,
    runs: Vec<Run>,
    ctx: RenderContext,
    rows: Vec<RenderedRow>,
    pub(crate) state: TableState,
    sort: Option<SortSpec>,
    loader: Option<Arc<RelatedRunsLoader>>,
    status: Option<String>,
}

impl TableApp {
    pub fn new(
        table: Table,
        runs: Vec<Run>,
        ctx: RenderContext,
        sort: Option<SortSpec>,
        loader: Option<Arc<RelatedRunsLoader>>,
    ) -> Result<Self, TableError> {
        let mut app = Self {
            table,
            runs,
            ctx,
            rows: Vec::new(),
            state: TableState::default(),
            sort: None,
            loader,
            status: None,
        };
        if let Some(sort) = sort {
            app.apply_sort(sort)?;
        } else {
            app.refresh();
        }
        if !app.rows.is_empty() {
            app.state.select(Some(0));
        }
        Ok(app)
    }

    pub fn columns(&self) -> Vec<&ColumnMeta> {
        self.table.columns().collect()
    }

    pub fn rows(&self) -> &[RenderedRow] {
        &self.rows
    }

    pub fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn selected_row(&self) -> Option<&RenderedRow> {
        self.state.selected().and_then(|idx| self.rows.get(idx))
    }

    /// Re-read the clock and re-render every row
    pub fn refresh(&mut self) {
        self.ctx.viewer.tick();
        self.rows = self.table.render(&self.runs, &self.ctx);
    }

    pub fn select_next(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        let next = match self.state.selected() {
            Some(idx) if idx + 1 < self.rows.len() => idx + 1,
            Some(idx) => idx,
            None => 0,
        };
        self.state.select(Some(next));
    }

    pub fn select_previous(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        let previous = self.state.selected().map_or(0, |idx| idx.saturating_sub(1));
        self.state.select(Some(previous));
    }

    /// Sort by the next sortable column, ascending
    pub fn cycle_sort(&mut self) {
        let sortable: Vec<String> = self
            .table
            .columns()
            .filter(|column| column.sortable)
            .map(|column| column.id.clone())
            .collect();
        if sortable.is_empty() {
            self.status = Some("No sortable columns".to_string());
            return;
        }

        let next = match &self.sort {
            Some(current) => sortable
                .iter()
                .position(|id| *id == current.column_id)
                .map_or(0, |idx| (idx + 1) % sortable.len()),
            None => 0,
        };
        self.try_sort(SortSpec::asc(sortable[next].clone()));
    }

    pub fn reverse_sort(&mut self) {
        if let Some(current) = self.sort.clone() {
            self.try_sort(SortSpec {
                column_id: current.column_id,
                direction: current.direction.toggled(),
            });
        }
    }

    fn try_sort(&mut self, sort: SortSpec) {
        if let Err(err) = self.apply_sort(sort) {
            self.status = Some(err.to_string());
        }
    }

    /// Reorder runs, keeping the selection on the same run
    fn apply_sort(&mut self, sort: SortSpec) -> Result<(), TableError> {
        let selected_id = self.selected_row().map(|row| row.run_id.clone());

        self.table.sort_runs(&mut self.runs, &sort)?;
        self.status = Some(format!(
            "Sorted by {} ({})",
            sort.column_id,
            match sort.direction {
                SortDirection::Ascending => "ascending",
                SortDirection::Descending => "descending",
            }
        ));
        self.sort = Some(sort);
        self.refresh();

        if let Some(id) = selected_id {
            let idx = self.runs.iter().position(|run| run.id == id);
            self.state.select(idx);
        }
        Ok(())
    }

    /// Redraw the row a finished related-runs read belongs to
    pub fn on_loader_event(&mut self, event: &LoaderEvent) {
        if let LoaderEvent::Failed { run_id, error } = event {
            self.status = Some(format!("Related runs for {run_id} unavailable: {error}"));
        }
        self.rerender(event.run_id());
    }

    /// Drop the selected row's related runs and fetch them again
    pub fn refetch_selected(&mut self) {
        let (Some(loader), Some(row)) = (self.loader.clone(), self.selected_row()) else {
            return;
        };
        let run_id = row.run_id.clone();
        loader.forget(&run_id);
        self.rerender(&run_id);
        self.status = Some(format!("Refetching related runs for {run_id}"));
    }

    pub fn pending_reads(&self) -> usize {
        self.loader.as_ref().map_or(0, |loader| loader.pending())
    }

    fn rerender(&mut self, run_id: &str) {
        if let Some(idx) = self.runs.iter().position(|run| run.id == run_id) {
            self.rows[idx] = self.table.render_row(&self.runs[idx], &self.ctx);
        }
    }
}
