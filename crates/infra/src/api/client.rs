//! API client with credential refresh and replay
//!
//! Dispatches [`RequestDescriptor`]s against `<base_url><api_prefix>`,
//! attaching the current credential on every call. Failures are normalized
//! first, then classified. A 401 on a request that has not been replayed yet
//! goes through the [`RefreshCoordinator`]: one refresh runs, every request
//! that hit 401 meanwhile waits for it and is replayed once with the new
//! credential. Nothing else is retried.

use std::sync::Arc;
use std::time::Duration;

use leadflow_domain::{ClientConfig, LeadflowError};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::oneshot;
use tracing::{debug, info, instrument, warn};
use url::Url;

use super::auth::{AuthInjector, CredentialSource, CredentialStore, TokenRefresher};
use super::errors::{ApiError, Failure};
use super::normalize::normalize;
use super::refresh::{RefreshCoordinator, RefreshRole};
use super::session::SessionRefresher;
use crate::errors::InfraError;
use crate::http::{HeaderMapWriter, HttpClient, QueryEncoding, RequestDescriptor, ResponseKind};

/// Authenticated API client
pub struct ApiClient {
    http_client: Arc<HttpClient>,
    injector: AuthInjector,
    refresher: Option<Arc<dyn TokenRefresher>>,
    coordinator: Arc<RefreshCoordinator>,
    config: ClientConfig,
    api_base: String,
}

impl ApiClient {
    /// Create a new API client
    ///
    /// Without a refresher a 401 is returned to the caller as
    /// [`ApiError::Auth`].
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Config` if the base URL is invalid or the HTTP
    /// client cannot be built
    pub fn new(
        config: ClientConfig,
        credentials: Arc<dyn CredentialSource>,
        refresher: Option<Arc<dyn TokenRefresher>>,
    ) -> Result<Self, ApiError> {
        let http_client = Arc::new(build_http_client(&config)?);
        Self::from_parts(config, http_client, credentials, refresher)
    }

    /// Client backed by an in-memory session that refreshes through the
    /// backend's refresh endpoint.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::new`]
    pub fn with_session(
        config: ClientConfig,
        store: Arc<CredentialStore>,
    ) -> Result<Self, ApiError> {
        let http_client = Arc::new(build_http_client(&config)?);
        let refresher = SessionRefresher::new(http_client.clone(), &config, store.clone());
        Self::from_parts(config, http_client, store, Some(Arc::new(refresher)))
    }

    fn from_parts(
        config: ClientConfig,
        http_client: Arc<HttpClient>,
        credentials: Arc<dyn CredentialSource>,
        refresher: Option<Arc<dyn TokenRefresher>>,
    ) -> Result<Self, ApiError> {
        let api_base = config.api_base();
        Url::parse(&api_base).map_err(|e| LeadflowError::from(InfraError::from(e)))?;

        Ok(Self {
            http_client,
            injector: AuthInjector::new(credentials),
            refresher,
            coordinator: Arc::new(RefreshCoordinator::new()),
            config,
            api_base,
        })
    }

    /// Create a builder for fluent configuration
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Refresh state shared by every request of this client
    pub fn coordinator(&self) -> &RefreshCoordinator {
        &self.coordinator
    }

    /// Absolute URL for a descriptor. The descriptor's own query is appended
    /// in raw rendering after any query already embedded in its path.
    pub fn url_for(&self, request: &RequestDescriptor) -> String {
        let mut url = join_url(&self.api_base, &request.path);
        let query = request.query.to_query_string(QueryEncoding::Raw);
        if !query.is_empty() {
            url.push(if url.contains('?') { '&' } else { '?' });
            url.push_str(&query);
        }
        url
    }

    /// Execute a request, refreshing the credential and replaying once on
    /// 401.
    ///
    /// # Errors
    ///
    /// Returns the normalized failure, or `ApiError::SessionExpired` when the
    /// refresh itself failed
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn execute(&self, request: RequestDescriptor) -> Result<Response, ApiError> {
        match self.dispatch(&request).await {
            Err(err) if err.is_unauthorized() && request.may_refresh() => {
                let Some(refresher) = self.refresher.clone() else {
                    return Err(err);
                };
                let credential = self.await_refresh(refresher).await?;
                let replay = request.for_replay(&credential)?;
                debug!("replaying request with refreshed credential");
                self.dispatch(&replay).await
            }
            other => other,
        }
    }

    /// Execute and decode the JSON body.
    ///
    /// 204/205 and empty bodies decode as `null`, or as `{}` when the target
    /// cannot be built from `null` (an envelope with every field defaulted).
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::execute`], plus `ApiError::Decode`
    pub async fn send<T: DeserializeOwned>(
        &self,
        request: RequestDescriptor,
    ) -> Result<T, ApiError> {
        let path = request.path.clone();
        let response = self.execute(request).await?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Decode(format!("failed to read response body: {e}")))?;

        let result = if status == StatusCode::NO_CONTENT
            || status == StatusCode::RESET_CONTENT
            || bytes.is_empty()
        {
            serde_json::from_value(serde_json::Value::Null)
                .or_else(|_| serde_json::from_value(serde_json::json!({})))
        } else {
            serde_json::from_slice(&bytes)
        }
        .map_err(|e| ApiError::Decode(format!("{path}: {e}")))?;

        info!(path = %path, %status, "request successful");
        Ok(result)
    }

    /// Execute a request whose response is raw bytes (file download).
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::execute`], plus `ApiError::Decode`
    pub async fn download(&self, request: RequestDescriptor) -> Result<Vec<u8>, ApiError> {
        let request = request.binary();
        let path = request.path.clone();
        let response = self.execute(request).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Decode(format!("failed to read download body: {e}")))?;
        info!(path = %path, size = bytes.len(), "download successful");
        Ok(bytes.to_vec())
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(RequestDescriptor::get(path)).await
    }

    pub async fn post<T: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<R, ApiError> {
        self.send(RequestDescriptor::post(path).with_json(body)?).await
    }

    pub async fn put<T: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<R, ApiError> {
        self.send(RequestDescriptor::put(path).with_json(body)?).await
    }

    pub async fn patch<T: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<R, ApiError> {
        self.send(RequestDescriptor::patch(path).with_json(body)?).await
    }

    pub async fn delete<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        self.send(RequestDescriptor::delete(path)).await
    }

    /// One network attempt. Success statuses are returned untouched; anything
    /// else becomes a normalized, classified failure.
    async fn dispatch(&self, request: &RequestDescriptor) -> Result<Response, ApiError> {
        let url = self.url_for(request);

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(accept_for(request.response_kind)));
        let mut writer = HeaderMapWriter::new(&mut headers);
        self.injector.inject(&mut writer).await?;
        request.headers.write_into(&mut writer)?;

        let mut builder = self.http_client.request(request.method.clone(), url).headers(headers);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        match self.http_client.send(builder).await {
            Ok(response) if response.status().is_success() => Ok(response),
            Ok(response) => {
                let status = response.status();
                let bytes = response.bytes().await.unwrap_or_else(|e| {
                    debug!(%status, error = %e, "failed to read error body");
                    Default::default()
                });
                let failure = Failure::from_status(status, error_body(&bytes), request.clone());
                Err(classify(failure))
            }
            Err(LeadflowError::Config(message)) => Err(ApiError::Config(message)),
            Err(err) => {
                warn!(error = %err, "no response received");
                Err(classify(Failure::network(request.clone())))
            }
        }
    }

    /// Join the refresh in flight, or start one, and wait for its outcome.
    async fn await_refresh(
        &self,
        refresher: Arc<dyn TokenRefresher>,
    ) -> Result<String, ApiError> {
        let (tx, rx) = oneshot::channel();
        let role = self.coordinator.begin_or_enqueue(Box::new(move |outcome| {
            let _ = tx.send(outcome);
        }));

        if role == RefreshRole::Leader {
            // Detached so that dropping the leading request cannot strand
            // the queue. The refresh itself runs in its own task so a panic
            // still settles every waiter.
            let coordinator = self.coordinator.clone();
            tokio::spawn(async move {
                let outcome = tokio::spawn(async move { refresher.refresh().await }).await;
                match outcome {
                    Ok(Ok(credential)) => {
                        coordinator.resolve_all(&credential);
                    }
                    Ok(Err(err)) => {
                        let expired = ApiError::SessionExpired(err.message().to_string());
                        coordinator.reject_all(&expired);
                    }
                    Err(join_err) => {
                        warn!(error = %join_err, "credential refresh task aborted");
                        let expired =
                            ApiError::SessionExpired(REFRESH_ABORTED_MESSAGE.to_string());
                        coordinator.reject_all(&expired);
                    }
                }
            });
        }

        rx.await
            .map_err(|_| ApiError::SessionExpired("credential refresh was abandoned".into()))?
    }
}

const REFRESH_ABORTED_MESSAGE: &str = "credential refresh failed unexpectedly";

fn classify(mut failure: Failure) -> ApiError {
    normalize(&mut failure);
    debug!(status = ?failure.status, message = %failure.message, "request failed");
    ApiError::from_failure(failure)
}

fn accept_for(kind: ResponseKind) -> &'static str {
    match kind {
        ResponseKind::Json => "application/json, text/plain, */*",
        ResponseKind::Binary => "*/*",
    }
}

/// JSON error body, or the raw text as a JSON string.
fn error_body(bytes: &[u8]) -> Option<serde_json::Value> {
    if bytes.is_empty() {
        return None;
    }
    serde_json::from_slice(bytes).ok().or_else(|| {
        let text = String::from_utf8_lossy(bytes).trim().to_string();
        (!text.is_empty()).then_some(serde_json::Value::String(text))
    })
}

/// `base` and `path` joined with exactly one slash.
pub(crate) fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    if path.is_empty() {
        return base.to_string();
    }
    if path.starts_with('/') || path.starts_with('?') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

fn build_http_client(config: &ClientConfig) -> Result<HttpClient, ApiError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    let mut builder = HttpClient::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .default_headers(headers)
        .cookie_store(true);
    if let Some(agent) = &config.user_agent {
        builder = builder.user_agent(agent.clone());
    }

    builder.build().map_err(|e| ApiError::Config(format!("Failed to build HttpClient: {e}")))
}

/// Builder for API client
#[derive(Default)]
pub struct ApiClientBuilder {
    config: Option<ClientConfig>,
    credentials: Option<Arc<dyn CredentialSource>>,
    refresher: Option<Arc<dyn TokenRefresher>>,
}

impl ApiClientBuilder {
    /// Set the client configuration
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the credential source read at every dispatch
    pub fn credentials(mut self, credentials: Arc<dyn CredentialSource>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set the refresher used on 401
    pub fn refresher(mut self, refresher: Arc<dyn TokenRefresher>) -> Self {
        self.refresher = Some(refresher);
        self
    }

    /// Build the API client
    ///
    /// # Errors
    ///
    /// Returns error if required fields are missing or client creation fails
    pub fn build(self) -> Result<ApiClient, ApiError> {
        let config = self.config.unwrap_or_default();
        let credentials = self
            .credentials
            .ok_or_else(|| ApiError::Config("Credential source not set".to_string()))?;

        ApiClient::new(config, credentials, self.refresher)
    }
}
