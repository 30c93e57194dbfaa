//! Tracing subscriber setup

use leadflow_domain::{LeadflowError, LoggingConfig, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Filter from `RUST_LOG` when set, otherwise from `config.level`.
///
/// # Errors
/// Returns `LeadflowError::Config` if the configured directive is invalid.
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.level).map_err(|e| {
        LeadflowError::Config(format!("Invalid log level '{}': {e}", config.level))
    })
}

/// Install the global subscriber: an env filter plus a JSON or
/// human-readable fmt layer.
///
/// # Errors
/// Returns `LeadflowError::Config` if the filter is invalid or a global
/// subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = build_filter(config)?;
    let registry = tracing_subscriber::registry().with(filter);

    let installed = if config.json {
        registry.with(fmt::layer().json().with_current_span(true)).try_init()
    } else {
        registry.with(fmt::layer().with_target(true)).try_init()
    };

    installed.map_err(|e| LeadflowError::Config(format!("Failed to install subscriber: {e}")))?;
    tracing::debug!(level = %config.level, json = config.json, "logging initialised");
    Ok(())
}
