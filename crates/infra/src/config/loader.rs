//! Configuration loader
//!
//! Loads client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If `LEADFLOW_BASE_URL` is missing or a value is invalid, falls back to
//!    loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `LEADFLOW_BASE_URL`: Server origin (required)
//! - `LEADFLOW_API_PREFIX`: Path prefix of every endpoint (default `/api`)
//! - `LEADFLOW_TIMEOUT_SECS`: Request timeout in seconds
//! - `LEADFLOW_USER_AGENT`: User-Agent header value
//! - `LEADFLOW_REFRESH_PATH`: Credential refresh endpoint
//! - `LEADFLOW_LOG_LEVEL`: Default log filter when `RUST_LOG` is unset
//! - `LEADFLOW_LOG_JSON`: Emit JSON logs (true/false)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./leadflow.json` or `./leadflow.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. `../../config.json` or `../../config.toml` (grandparent directory)
//! 5. Relative to executable location

use std::path::{Path, PathBuf};

use leadflow_domain::{ClientConfig, Config, LeadflowError, LoggingConfig, Result};
use url::Url;

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If the required
/// variable is missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `LeadflowError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - The base URL is not a valid absolute URL
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// Only `LEADFLOW_BASE_URL` is required; everything else falls back to
/// [`Config::default`].
///
/// # Errors
/// Returns `LeadflowError::Config` if the base URL is missing or invalid, or
/// a numeric variable does not parse.
pub fn load_from_env() -> Result<Config> {
    let defaults = ClientConfig::default();

    let base_url = env_var("LEADFLOW_BASE_URL")?;
    validate_base_url(&base_url)?;

    let timeout_seconds = match std::env::var("LEADFLOW_TIMEOUT_SECS").ok() {
        Some(raw) => raw
            .parse::<u64>()
            .map_err(|e| LeadflowError::Config(format!("Invalid timeout: {e}")))?,
        None => defaults.timeout_seconds,
    };

    let client = ClientConfig {
        base_url,
        api_prefix: std::env::var("LEADFLOW_API_PREFIX").unwrap_or(defaults.api_prefix),
        timeout_seconds,
        user_agent: std::env::var("LEADFLOW_USER_AGENT").ok(),
        refresh_path: std::env::var("LEADFLOW_REFRESH_PATH").unwrap_or(defaults.refresh_path),
    };

    let logging_defaults = LoggingConfig::default();
    let logging = LoggingConfig {
        level: std::env::var("LEADFLOW_LOG_LEVEL").unwrap_or(logging_defaults.level),
        json: env_bool("LEADFLOW_LOG_JSON", logging_defaults.json),
    };

    Ok(Config { client, logging })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Arguments
/// * `path` - Optional path to config file. If `None`, uses
///   [`probe_config_paths`].
///
/// # Errors
/// Returns `LeadflowError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - The base URL is not a valid absolute URL
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(LeadflowError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            LeadflowError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| LeadflowError::Config(format!("Failed to read config file: {e}")))?;

    let config = parse_config(&contents, &config_path)?;
    validate_base_url(&config.client.base_url)?;
    Ok(config)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| LeadflowError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| LeadflowError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(LeadflowError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(candidates_in(&cwd));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(candidates_in(exe_dir));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn candidates_in(dir: &Path) -> Vec<PathBuf> {
    vec![
        dir.join("config.json"),
        dir.join("config.toml"),
        dir.join("leadflow.json"),
        dir.join("leadflow.toml"),
        dir.join("../config.json"),
        dir.join("../config.toml"),
        dir.join("../../config.json"),
        dir.join("../../config.toml"),
    ]
}

/// Base URLs must be absolute `http`/`https` URLs.
fn validate_base_url(raw: &str) -> Result<()> {
    let url = Url::parse(raw)
        .map_err(|e| LeadflowError::Config(format!("Invalid base URL '{raw}': {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(LeadflowError::Config(format!("Unsupported base URL scheme: {other}"))),
    }
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| LeadflowError::Config(format!("Missing required environment variable: {key}")))
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
