// Logging setup
//
// Everything goes to stderr. stdout only ever carries JSON results.

use crate::error::{OnboardError, Result};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber at `level`, unless `RUST_LOG` says otherwise
pub fn init(level: &str) -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(parse_level(level)?.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| OnboardError::Logger(e.to_string()))
}

/// Check a configured level name such as `warn` or `debug`
pub fn parse_level(level: &str) -> Result<LevelFilter> {
    let level = level.trim();
    if level.is_empty() {
        return Err(OnboardError::Config("log level is empty".to_string()));
    }

    level
        .parse()
        .map_err(|_| OnboardError::Config(format!("unknown log level: {}", level)))
}
