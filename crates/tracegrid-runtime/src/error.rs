use std::path::PathBuf;

use thiserror::Error;

/// Result type for tracegrid-runtime operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("invalid run data in {path}: {source}")]
    Runs {
        path: PathBuf,
        #[source]
        source: tracegrid_types::Error,
    },

    #[error(transparent)]
    Table(#[from] tracegrid_engine::TableError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}
