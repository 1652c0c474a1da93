//! Tracing and structured logging

use tracing_subscriber::EnvFilter;

use crate::{
    config::Config,
    error::{Error, Result},
};

/// Initialize JSON tracing output filtered by `service.log_level`
///
/// `RUST_LOG`-style directives are accepted; an unparsable level falls back
/// to `info`. Fails if a global subscriber is already installed.
pub fn init_tracing(config: &Config) -> Result<()> {
    let log_level = config.service.log_level.clone();

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(
            EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init()
        .map_err(|e| Error::Internal(format!("Failed to initialize tracing: {}", e)))?;

    tracing::info!(
        environment = %config.service.environment,
        "Tracing initialized for service: {}", config.service.name
    );

    Ok(())
}

/// Shutdown tracing
///
/// The fmt subscriber writes synchronously, so there is nothing to flush.
pub fn shutdown_tracing() {
    tracing::info!("Tracing shutdown complete");
}
