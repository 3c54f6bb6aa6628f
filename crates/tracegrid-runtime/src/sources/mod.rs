//! Stores that can answer "which runs are related to this one".

mod file;
mod http;

pub use file::{FileRunsSource, load_runs};
pub use http::HttpRunsSource;
