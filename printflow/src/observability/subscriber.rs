//! Global subscriber setup.

use crate::config::LoggingSettings;
use crate::errors::PrintflowError;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Builds the filter for `settings`.
///
/// `RUST_LOG` wins over the configured level when it is set.
///
/// # Errors
///
/// Returns `PrintflowError::Logging` if the configured directive is invalid.
pub fn build_env_filter(settings: &LoggingSettings) -> Result<EnvFilter, PrintflowError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    EnvFilter::try_new(&settings.level)
        .map_err(|e| PrintflowError::Logging(format!("invalid log filter '{}': {e}", settings.level)))
}

/// Installs the global `tracing` subscriber.
///
/// # Errors
///
/// Returns `PrintflowError::Logging` if the filter is invalid or a global
/// subscriber is already installed.
pub fn init_tracing(settings: &LoggingSettings) -> Result<(), PrintflowError> {
    let env_filter = build_env_filter(settings)?;

    let fmt_layer = layer().with_target(settings.with_target);
    let fmt_layer = if settings.json {
        fmt_layer.json().boxed()
    } else {
        fmt_layer.compact().boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| PrintflowError::Logging(e.to_string()))
}
