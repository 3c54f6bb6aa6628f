//! stderr logging for the CLI.

use tracing_subscriber::EnvFilter;

use crate::types::LogLevel;

pub const LOG_ENV: &str = "TRACEGRID_LOG";

/// `--log-level` wins; otherwise `TRACEGRID_LOG` directives; otherwise `warn`
pub fn filter(level: Option<LogLevel>) -> EnvFilter {
    match level {
        Some(level) => EnvFilter::new(level.to_string()),
        None => EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
    }
}

/// Install the global subscriber; a second call is a no-op
pub fn init(level: Option<LogLevel>) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
