//! Refresh-token exchange against the backend

use std::sync::Arc;

use async_trait::async_trait;
use leadflow_domain::ClientConfig;
use reqwest::Method;
use serde_json::{json, Value};
use tracing::{debug, info, instrument, warn};

use super::auth::{CredentialStore, TokenRefresher};
use super::client::join_url;
use super::errors::{default_message, ApiError};
use super::normalize::extract_message;
use crate::http::HttpClient;

/// Posts the stored refresh token to the refresh endpoint and stores the
/// access token it returns.
///
/// Goes straight to the transport; a 401 from the refresh endpoint is a
/// failed refresh, never a reason to refresh again.
pub struct SessionRefresher {
    http_client: Arc<HttpClient>,
    url: String,
    store: Arc<CredentialStore>,
}

impl SessionRefresher {
    pub fn new(
        http_client: Arc<HttpClient>,
        config: &ClientConfig,
        store: Arc<CredentialStore>,
    ) -> Self {
        Self { http_client, url: join_url(&config.api_base(), &config.refresh_path), store }
    }
}

#[async_trait]
impl TokenRefresher for SessionRefresher {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn refresh(&self) -> Result<String, ApiError> {
        let Some(refresh_token) = self.store.refresh_token().await else {
            return Err(ApiError::SessionExpired("no refresh token available".into()));
        };

        let builder = self
            .http_client
            .request(Method::POST, &self.url)
            .json(&json!({ "refresh_token": refresh_token }));
        let response = self
            .http_client
            .send(builder)
            .await
            .map_err(|e| ApiError::SessionExpired(e.to_string()))?;

        let status = response.status();
        let bytes = response.bytes().await.unwrap_or_else(|e| {
            debug!(%status, error = %e, "failed to read refresh response body");
            Default::default()
        });
        let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        if !status.is_success() {
            let message = extract_message(&body).unwrap_or_else(|| default_message(Some(status)));
            warn!(%status, "refresh rejected");
            return Err(ApiError::SessionExpired(message));
        }

        let data = body.get("data").unwrap_or(&body);
        let Some(access) = first_string(data, &["access_token", "accessToken", "token"]) else {
            return Err(ApiError::SessionExpired("refresh response had no access token".into()));
        };

        match first_string(data, &["refresh_token", "refreshToken"]) {
            Some(rotated) => self.store.set_tokens(access.clone(), Some(rotated)).await,
            None => self.store.set_access_token(access.clone()).await,
        }

        info!("access token refreshed");
        Ok(access)
    }
}

fn first_string(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| value.get(*key).and_then(Value::as_str))
        .find(|s| !s.is_empty())
        .map(str::to_string)
}
