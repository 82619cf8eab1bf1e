//! Logging setup.

use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, ConfigError};

/// Installs the global `tracing` subscriber, writing to stderr.
///
/// Must be called at most once per process.
pub fn init_tracing(config: &AppConfig) -> Result<(), ConfigError> {
    let filter = EnvFilter::try_new(&config.log_filter)
        .map_err(|_| ConfigError::InvalidValue("TALLY_LOG".to_string()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}
