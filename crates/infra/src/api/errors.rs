//! API-specific error types
//!
//! Every failure that came out of an HTTP exchange carries a [`Failure`]:
//! the status (absent when no response arrived), the normalized message, the
//! server's error code if any, the raw JSON body and the request that
//! produced it.

use leadflow_domain::constants::{NETWORK_ERROR_MESSAGE, STATUS_ERROR_PREFIX};
use leadflow_domain::LeadflowError;
use reqwest::StatusCode;
use thiserror::Error;

use crate::http::RequestDescriptor;

/// Categories of API errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCategory {
    /// Authentication errors (401, 403)
    Authentication,
    /// Rate limiting errors (429)
    RateLimit,
    /// Server errors (5xx)
    Server,
    /// Client errors (4xx except auth)
    Client,
    /// No response received
    Network,
    /// Credential refresh failed; the user must sign in again
    Session,
    /// Response could not be decoded
    Decode,
    /// Configuration errors
    Config,
}

/// A failed HTTP exchange
#[derive(Debug, Clone)]
pub struct Failure {
    pub status: Option<StatusCode>,
    /// Human-readable message; the server's message once normalized
    pub message: String,
    /// Server-supplied error code, when the body had one
    pub code: Option<String>,
    pub body: Option<serde_json::Value>,
    pub request: RequestDescriptor,
}

impl Failure {
    /// Failure for a response with a non-success status.
    pub fn from_status(
        status: StatusCode,
        body: Option<serde_json::Value>,
        request: RequestDescriptor,
    ) -> Self {
        Self {
            status: Some(status),
            message: default_message(Some(status)),
            code: None,
            body,
            request,
        }
    }

    /// Failure for a request that never received a response.
    pub fn network(request: RequestDescriptor) -> Self {
        Self {
            status: None,
            message: default_message(None),
            code: None,
            body: None,
            request,
        }
    }
}

/// Message used when the server supplies none.
pub fn default_message(status: Option<StatusCode>) -> String {
    match status {
        Some(status) => format!("{STATUS_ERROR_PREFIX} {}", status.as_u16()),
        None => NETWORK_ERROR_MESSAGE.to_string(),
    }
}

/// API operation errors
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("{}", .0.message)]
    Auth(Box<Failure>),

    #[error("{}", .0.message)]
    RateLimit(Box<Failure>),

    #[error("{}", .0.message)]
    Server(Box<Failure>),

    #[error("{}", .0.message)]
    Client(Box<Failure>),

    #[error("{}", .0.message)]
    Network(Box<Failure>),

    #[error("Session expired: {0}")]
    SessionExpired(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Classify a normalized failure by its status.
    pub fn from_failure(failure: Failure) -> Self {
        let failure = Box::new(failure);
        match failure.status {
            None => Self::Network(failure),
            Some(StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) => Self::Auth(failure),
            Some(StatusCode::TOO_MANY_REQUESTS) => Self::RateLimit(failure),
            Some(status) if status.is_server_error() => Self::Server(failure),
            Some(status) if status.is_client_error() => Self::Client(failure),
            Some(_) => Self::Server(failure),
        }
    }

    /// Get the error category for this error
    pub fn category(&self) -> ApiErrorCategory {
        match self {
            Self::Auth(_) => ApiErrorCategory::Authentication,
            Self::RateLimit(_) => ApiErrorCategory::RateLimit,
            Self::Server(_) => ApiErrorCategory::Server,
            Self::Client(_) => ApiErrorCategory::Client,
            Self::Network(_) => ApiErrorCategory::Network,
            Self::SessionExpired(_) => ApiErrorCategory::Session,
            Self::Decode(_) => ApiErrorCategory::Decode,
            Self::Config(_) => ApiErrorCategory::Config,
        }
    }

    /// The human-readable message, without any category prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::Auth(f)
            | Self::RateLimit(f)
            | Self::Server(f)
            | Self::Client(f)
            | Self::Network(f) => &f.message,
            Self::SessionExpired(m) | Self::Decode(m) | Self::Config(m) => m,
        }
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Self::Auth(f)
            | Self::RateLimit(f)
            | Self::Server(f)
            | Self::Client(f)
            | Self::Network(f) => Some(f),
            Self::SessionExpired(_) | Self::Decode(_) | Self::Config(_) => None,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        self.failure().and_then(|f| f.status)
    }

    /// True for a plain 401 response (403 is not refreshable).
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }
}

/// Errors raised before a request leaves the client
impl From<LeadflowError> for ApiError {
    fn from(err: LeadflowError) -> Self {
        match err {
            LeadflowError::Config(message) | LeadflowError::InvalidInput(message) => {
                Self::Config(message)
            }
            other => Self::Config(other.to_string()),
        }
    }
}
