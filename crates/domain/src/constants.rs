//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! client.

// Transport defaults
pub const DEFAULT_BASE_URL: &str = "http://localhost:4000";
pub const DEFAULT_API_PREFIX: &str = "/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_REFRESH_PATH: &str = "/auth/refresh-token";

// Failure messages used when the server does not supply one
pub const NETWORK_ERROR_MESSAGE: &str = "Network Error";
pub const STATUS_ERROR_PREFIX: &str = "Request failed with status code";

// Notification feed
pub const NOTIFICATION_TOPIC_PREFIX: &str = "user:";
pub const NOTIFICATION_FIRST_PAGE_LIMIT: u32 = 10;

// Logging
pub const DEFAULT_LOG_LEVEL: &str = "info";
