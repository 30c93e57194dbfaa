//! Request descriptors
//!
//! A descriptor is everything needed to dispatch a call again: method, path
//! relative to the API base, query, JSON body, per-request header overrides
//! and the expected response kind. Failures keep the descriptor so a
//! rejected call can be replayed after a credential refresh.

use leadflow_domain::LeadflowError;
use reqwest::Method;
use serde::Serialize;

use super::headers::{HeaderWriter, PlainHeaders};
use super::query::QueryParams;

/// How a successful response body is consumed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseKind {
    #[default]
    Json,
    /// Raw bytes, e.g. a CSV export
    Binary,
}

/// A replayable outgoing request
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub method: Method,
    /// Path relative to the API base; may already carry a query string
    pub path: String,
    pub query: QueryParams,
    pub body: Option<serde_json::Value>,
    pub headers: PlainHeaders,
    pub response_kind: ResponseKind,
    /// Set once the request has been replayed after a refresh
    pub retried: bool,
    /// A 401 is returned as is instead of refreshing the stored credential
    pub skip_refresh: bool,
}

impl RequestDescriptor {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: QueryParams::new(),
            body: None,
            headers: PlainHeaders::new(),
            response_kind: ResponseKind::Json,
            retried: false,
            skip_refresh: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    #[must_use]
    pub fn with_query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Serialize `payload` as the JSON body.
    ///
    /// # Errors
    ///
    /// Returns `LeadflowError::InvalidInput` when the payload cannot be
    /// represented as JSON.
    pub fn with_json<T: Serialize + ?Sized>(self, payload: &T) -> Result<Self, LeadflowError> {
        let body = serde_json::to_value(payload).map_err(|e| {
            LeadflowError::InvalidInput(format!("failed to serialize request body: {e}"))
        })?;
        Ok(self.with_body(body))
    }

    /// Add a per-request header override.
    ///
    /// # Errors
    ///
    /// Returns `LeadflowError::Config` for an empty header name.
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self, LeadflowError> {
        self.headers.set(name, value)?;
        Ok(self)
    }

    /// Never refresh and replay this request. Used when the request carries
    /// its own credential, which a replay would overwrite.
    #[must_use]
    pub fn without_refresh(mut self) -> Self {
        self.skip_refresh = true;
        self
    }

    /// Whether a 401 on this request may go through refresh and replay.
    pub fn may_refresh(&self) -> bool {
        !self.retried && !self.skip_refresh
    }

    #[must_use]
    pub fn binary(mut self) -> Self {
        self.response_kind = ResponseKind::Binary;
        self
    }

    /// Copy of this request carrying a fresh bearer credential, marked as
    /// retried so it is never replayed a second time.
    ///
    /// # Errors
    ///
    /// Returns `LeadflowError::Config` if the header cannot be written.
    pub fn for_replay(&self, credential: &str) -> Result<Self, LeadflowError> {
        let mut replay = self.clone();
        replay.headers.set("Authorization", &format!("Bearer {credential}"))?;
        replay.retried = true;
        Ok(replay)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn defaults_to_json_and_not_retried() {
        let request = RequestDescriptor::get("/dashboard");
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.response_kind, ResponseKind::Json);
        assert!(!request.retried);
        assert!(request.may_refresh());
        assert!(request.body.is_none());
        assert!(request.headers.is_empty());
    }

    #[test]
    fn replay_carries_new_credential_and_retry_mark() {
        let original = RequestDescriptor::post("/leads/create")
            .with_json(&json!({"first_name": "Ada"}))
            .unwrap()
            .with_header("Authorization", "Bearer stale")
            .unwrap();

        let replay = original.for_replay("fresh").unwrap();

        assert!(replay.retried);
        assert_eq!(replay.headers.get("authorization"), Some("Bearer fresh"));
        assert_eq!(replay.body, original.body);
        assert_eq!(replay.path, original.path);
        assert!(!original.retried);
        assert_eq!(original.headers.get("Authorization"), Some("Bearer stale"));
    }

    #[test]
    fn replayed_or_opted_out_requests_never_refresh() {
        let request = RequestDescriptor::get("/auth/verification");
        assert!(!request.for_replay("fresh").unwrap().may_refresh());
        assert!(!request.clone().without_refresh().may_refresh());
    }

    #[test]
    fn binary_marks_response_kind() {
        let request = RequestDescriptor::get("/leads/download").binary();
        assert_eq!(request.response_kind, ResponseKind::Binary);
    }
}
