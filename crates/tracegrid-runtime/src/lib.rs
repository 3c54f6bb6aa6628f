//! Host-side plumbing for tracegrid tables: configuration, the stores that
//! answer "which runs are related to this one", and the background loader
//! that keeps those reads off the render path.

pub mod config;
pub mod error;
pub mod loader;
pub mod sources;

pub use config::{ApiConfig, Config, DisplayConfig, DurationStyle, TableConfig, resolve_config_path};
pub use error::{Error, Result};
pub use loader::{LoaderEvent, RelatedRunsLoader};
pub use sources::{FileRunsSource, HttpRunsSource, load_runs};
