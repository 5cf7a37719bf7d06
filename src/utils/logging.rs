//! # Logging
//!
//! Installs a `tracing-subscriber` formatter driven by [`LoggingConfig`].
//!
//! `RUST_LOG`, when set, takes precedence over the configured level.

use tracing::debug;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::error::{ProtocolError, Result};

/// Install the global subscriber.
///
/// Returns `Ok(false)` when a subscriber was already installed, which leaves
/// that subscriber in place.
///
/// # Errors
/// `ConfigError` if the logging configuration does not validate.
pub fn init_logging(config: &LoggingConfig) -> Result<bool> {
    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ProtocolError::ConfigError(errors.join("; ")));
    }

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(config.log_level).into())
        .from_env_lossy();

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let installed = if config.json_format {
        builder.json().try_init().is_ok()
    } else {
        builder.try_init().is_ok()
    };

    if installed {
        debug!(app = %config.app_name, level = %config.log_level, "Logging initialized");
    }
    Ok(installed)
}
