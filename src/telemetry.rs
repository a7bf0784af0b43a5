//! Tracing setup for processes embedding the workflow engine.
//!
//! The filter comes from `RUST_LOG` when set; otherwise the configured
//! portal log level is used. A bare level like `info` is widened into a
//! directive set that keeps the HTTP client's own output at `warn`, so
//! workflow and gateway events stay readable at `debug`.

use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

use crate::config::TelemetryConfig;

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("invalid log filter '{value}'")]
    InvalidFilter {
        value: String,
        #[source]
        source: ParseError,
    },
    #[error("tracing was already initialized for this process")]
    AlreadyInitialized,
}

/// Install the global subscriber. Call once at startup, after
/// [`PortalConfig::load`](crate::config::PortalConfig::load).
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(config)?)
        .with_target(false)
        .with_ansi(false)
        .compact()
        .try_init()
        .map_err(|_| TelemetryError::AlreadyInitialized)
}

fn build_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    // PORTAL_LOG_LEVEL accepts either full directives or a bare level.
    let is_bare_level =
        !config.log_level.contains('=') && !config.log_level.contains(',');
    let directives = if is_bare_level {
        format!("{},reqwest=warn", config.log_level)
    } else {
        config.log_level.clone()
    };

    EnvFilter::try_new(&directives).map_err(|source| TelemetryError::InvalidFilter {
        value: config.log_level.clone(),
        source,
    })
}
