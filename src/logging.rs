//! Logging setup for applications embedding the adapters.
//!
//! The adapters themselves only emit `tracing` events; hosts that want output
//! on stderr can call [`init_logging`] once at startup.

use crate::Result;

/// Maps the verbosity flags onto a maximum tracing level.
fn level_for(verbose: u8, quiet: bool) -> tracing::Level {
    match (quiet, verbose) {
        (true, _) => tracing::Level::ERROR,
        (false, 0) => tracing::Level::INFO,
        (false, 1) => tracing::Level::DEBUG,
        (false, _) => tracing::Level::TRACE,
    }
}

/// Initializes structured logging based on verbosity level.
///
/// # Arguments
/// * `verbose` - Verbosity level (0=INFO, 1=DEBUG, 2+=TRACE)
/// * `quiet` - If true, only show ERROR level logs
///
/// # Errors
/// Returns a configuration error if a global subscriber is already installed.
pub fn init_logging(verbose: u8, quiet: bool) -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(level_for(verbose, quiet))
        .with_target(false)
        .try_init()
        .map_err(|e| {
            crate::error::AdapterError::configuration(format!(
                "failed to initialize logging: {e}"
            ))
        })?;

    Ok(())
}
