//! Configuration management

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_API_PREFIX, DEFAULT_BASE_URL, DEFAULT_LOG_LEVEL, DEFAULT_REFRESH_PATH,
    DEFAULT_TIMEOUT_SECS,
};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote API client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Server origin, e.g. `http://localhost:4000`
    pub base_url: String,
    /// Path prefix every endpoint lives under
    pub api_prefix: String,
    pub timeout_seconds: u64,
    pub user_agent: Option<String>,
    /// Endpoint used to exchange a refresh token for a new access token
    pub refresh_path: String,
}

impl ClientConfig {
    /// Base URL and prefix joined with exactly one slash between them.
    pub fn api_base(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        let prefix = self.api_prefix.trim_matches('/');
        if prefix.is_empty() {
            base.to_string()
        } else {
            format!("{base}/{prefix}")
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
            refresh_path: DEFAULT_REFRESH_PATH.to_string(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is not set
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: DEFAULT_LOG_LEVEL.to_string(), json: false }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_base_joins_without_double_slash() {
        let config = ClientConfig {
            base_url: "http://localhost:4000/".into(),
            api_prefix: "/api".into(),
            ..Default::default()
        };
        assert_eq!(config.api_base(), "http://localhost:4000/api");
    }

    #[test]
    fn api_base_with_empty_prefix() {
        let config = ClientConfig { api_prefix: String::new(), ..Default::default() };
        assert_eq!(config.api_base(), "http://localhost:4000");
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"client": {"base_url": "https://api.example.com"}}"#)
                .unwrap();
        assert_eq!(config.client.base_url, "https://api.example.com");
        assert_eq!(config.client.api_prefix, "/api");
        assert_eq!(config.client.timeout_seconds, 30);
        assert_eq!(config.logging, LoggingConfig::default());
    }
}
