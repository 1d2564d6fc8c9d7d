//! Tracing subscriber initialization.

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::{LogFormat, LogLevel};

/// Errors from observability setup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ObservabilityError {
    #[error("Unknown log level: {0}")]
    InvalidLevel(String),

    #[error("Unknown log format: {0} (expected human or json)")]
    InvalidFormat(String),

    #[error("Invalid log filter: {0}")]
    InvalidFilter(String),
}

/// Filter directive for `level`, unless `RUST_LOG` is set.
pub fn env_filter(level: LogLevel) -> Result<EnvFilter, ObservabilityError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(level.as_str())
            .map_err(|e| ObservabilityError::InvalidFilter(e.to_string())),
    }
}

/// Install the global `tracing` subscriber writing to stderr.
///
/// `RUST_LOG` overrides `level`. Safe to call more than once; later calls
/// leave the first subscriber in place.
pub fn init_tracing(level: LogLevel, format: LogFormat) -> Result<(), ObservabilityError> {
    let filter = env_filter(level)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Human => builder.compact().try_init(),
    };
    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_is_ok() {
        assert!(init_tracing(LogLevel::Warn, LogFormat::Human).is_ok());
        assert!(init_tracing(LogLevel::Debug, LogFormat::Json).is_ok());
    }
}
