use thiserror::Error;

/// Result type for tracegrid-types operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the types layer
#[derive(Debug, Error)]
pub enum Error {
    /// Payload was not valid JSON or did not match the run schema
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// JSON was valid but not a run list
    #[error("Unexpected payload shape: {0}")]
    Shape(String),
}
