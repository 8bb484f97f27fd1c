//! Tracing subscriber setup for the command-line driver

use crate::io::error::{Result, invalid_parameter};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Build the event filter: `RUST_LOG` when set, otherwise `level`
///
/// # Errors
///
/// Returns `InvalidParameter` if `level` is not a valid filter directive
pub fn log_filter(level: &str) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(level).map_err(|e| invalid_parameter("log-level", &level, &e))
}

/// Install a stderr fmt subscriber for the rest of the process
///
/// Returns false when another subscriber was already installed, in which
/// case that one keeps receiving events.
///
/// # Errors
///
/// Returns `InvalidParameter` if `level` is not a valid filter directive
pub fn init_logging(level: &str) -> Result<bool> {
    let filter = log_filter(level)?;
    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init()
        .is_ok();
    Ok(installed)
}
