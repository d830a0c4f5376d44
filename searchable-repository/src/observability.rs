//! Tracing subscriber setup

use tracing_subscriber::EnvFilter;

use crate::config::{Config, LogFormat};
use crate::error::{Error, Result};

/// Install the global tracing subscriber
///
/// The filter comes from `config.service.log_level`; an unparsable directive
/// falls back to `info`.
///
/// # Errors
///
/// Returns [`Error::Tracing`] if a global subscriber is already installed.
pub fn init_tracing(config: &Config) -> Result<()> {
    let filter = env_filter(&config.service.log_level);

    let installed = match config.service.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::fmt()
            .pretty()
            .with_env_filter(filter)
            .try_init(),
    };
    installed.map_err(|e| Error::Tracing(e.to_string()))?;

    tracing::info!("Tracing initialized for service: {}", config.service.name);

    Ok(())
}

/// Log the end of tracing for the service
pub fn shutdown_tracing() {
    tracing::info!("Tracing shutdown complete");
}

fn env_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"))
}
