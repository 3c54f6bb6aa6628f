use std::cmp::Ordering;
use std::str::FromStr;

use serde::Serialize;
use tracegrid_types::Run;

use crate::cell::Cell;
use crate::columns::{Column, ColumnMeta};
use crate::context::RenderContext;
use crate::error::TableError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub column_id: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(column_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            direction: SortDirection::Ascending,
        }
    }

    pub fn desc(column_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            direction: SortDirection::Descending,
        }
    }
}

impl FromStr for SortSpec {
    type Err = TableError;

    /// `cost`, `cost:asc` or `cost:desc`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (column, direction) = match s.trim().split_once(':') {
            Some((column, dir)) => match dir.trim().to_ascii_lowercase().as_str() {
                "asc" => (column, SortDirection::Ascending),
                "desc" => (column, SortDirection::Descending),
                _ => return Err(TableError::InvalidSort(s.to_string())),
            },
            None => (s, SortDirection::Ascending),
        };
        let column = column.trim();
        if column.is_empty() {
            return Err(TableError::InvalidSort(s.to_string()));
        }
        Ok(Self {
            column_id: column.to_string(),
            direction,
        })
    }
}

/// Cells of one row, in column order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedRow {
    pub run_id: String,
    pub cells: Vec<Cell>,
}

/// Ordered, immutable set of columns
pub struct Table {
    columns: Vec<Box<dyn Column>>,
}

impl std::fmt::Debug for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Table")
            .field(
                "columns",
                &self.columns.iter().map(|c| c.meta()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[derive(Default)]
pub struct TableBuilder {
    columns: Vec<Box<dyn Column>>,
}

impl TableBuilder {
    pub fn column(self, column: impl Column + 'static) -> Self {
        self.boxed(Box::new(column))
    }

    pub fn boxed(mut self, column: Box<dyn Column>) -> Self {
        self.columns.push(column);
        self
    }

    /// Fails when two columns share an id
    pub fn build(self) -> Result<Table, TableError> {
        for (idx, column) in self.columns.iter().enumerate() {
            let id = &column.meta().id;
            if self.columns[..idx].iter().any(|c| &c.meta().id == id) {
                return Err(TableError::DuplicateColumn(id.clone()));
            }
        }
        Ok(Table {
            columns: self.columns,
        })
    }
}

impl Table {
    pub fn builder() -> TableBuilder {
        TableBuilder::default()
    }

    pub fn columns(&self) -> impl Iterator<Item = &ColumnMeta> {
        self.columns.iter().map(|c| c.meta())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn headers(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.meta().header.as_str()).collect()
    }

    pub fn column(&self, id: &str) -> Option<&dyn Column> {
        self.columns
            .iter()
            .find(|c| c.meta().id == id)
            .map(|c| c.as_ref())
    }

    pub fn render_row(&self, run: &Run, ctx: &RenderContext) -> RenderedRow {
        RenderedRow {
            run_id: run.id.clone(),
            cells: self.columns.iter().map(|c| c.cell(run, ctx)).collect(),
        }
    }

    pub fn render(&self, runs: &[Run], ctx: &RenderContext) -> Vec<RenderedRow> {
        runs.iter().map(|run| self.render_row(run, ctx)).collect()
    }

    /// Row indices in sorted order
    ///
    /// Rows whose value is unorderable (it does not even compare with itself,
    /// like the duration of an unfinished run) keep their relative order and
    /// go last in both directions.
    pub fn sorted_indices(&self, runs: &[Run], sort: &SortSpec) -> Result<Vec<usize>, TableError> {
        let column = self
            .column(&sort.column_id)
            .ok_or_else(|| TableError::UnknownColumn(sort.column_id.clone()))?;
        if !column.meta().sortable {
            return Err(TableError::NotSortable(sort.column_id.clone()));
        }

        let (mut orderable, unorderable): (Vec<usize>, Vec<usize>) = (0..runs.len())
            .partition(|&idx| column.compare_runs(&runs[idx], &runs[idx]).is_some());

        orderable.sort_by(|&a, &b| {
            let ord = column
                .compare_runs(&runs[a], &runs[b])
                .unwrap_or(Ordering::Equal);
            match sort.direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            }
        });

        orderable.extend(unorderable);
        Ok(orderable)
    }

    pub fn sort_runs(&self, runs: &mut Vec<Run>, sort: &SortSpec) -> Result<(), TableError> {
        let order = self.sorted_indices(runs, sort)?;
        let mut slots: Vec<Option<Run>> = runs.drain(..).map(Some).collect();
        runs.extend(order.into_iter().filter_map(|idx| slots[idx].take()));
        Ok(())
    }
}
