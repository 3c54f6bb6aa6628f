use thiserror::Error;

/// Failure reported by a [`RelatedRunsSource`](crate::RelatedRunsSource)
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// Request could not be sent or the connection failed
    #[error("transport error: {0}")]
    Transport(String),

    /// Remote answered with a non-success status
    #[error("unexpected status {status} for {url}")]
    Status { status: u16, url: String },

    /// Response body was not a run list
    #[error("invalid response: {0}")]
    Decode(String),

    /// Source has no such run
    #[error("run not found: {0}")]
    NotFound(String),
}

/// Errors raised while assembling or sorting a table
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("duplicate column id: {0}")]
    DuplicateColumn(String),

    #[error("unknown column: {0}")]
    UnknownColumn(String),

    #[error("column is not sortable: {0}")]
    NotSortable(String),

    #[error("invalid sort `{0}`, expected COLUMN or COLUMN:asc|desc")]
    InvalidSort(String),
}
