#![allow(dead_code)]

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use leadflow_domain::ClientConfig;
use leadflow_infra::api::{ApiClient, ApiError, CredentialStore, TokenRefresher};
use serde_json::{json, Value};
use tracing::subscriber::DefaultGuard;
use wiremock::MockServer;

/// Client configuration pointing at a mock server.
pub fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig { base_url: server.uri(), timeout_seconds: 5, ..Default::default() }
}

/// A credential store holding `access` (and optionally a refresh token).
pub async fn signed_in(access: &str, refresh: Option<&str>) -> Arc<CredentialStore> {
    let store = Arc::new(CredentialStore::new());
    store.set_tokens(access, refresh.map(str::to_string)).await;
    store
}

/// Client whose refresher is the backend's own refresh endpoint.
pub fn session_client(server: &MockServer, store: Arc<CredentialStore>) -> Arc<ApiClient> {
    Arc::new(ApiClient::with_session(config_for(server), store).expect("client should build"))
}

/// Client with a scripted refresher.
pub fn scripted_client(
    server: &MockServer,
    store: Arc<CredentialStore>,
    refresher: Arc<ScriptedRefresher>,
) -> Arc<ApiClient> {
    let client = ApiClient::builder()
        .config(config_for(server))
        .credentials(store)
        .refresher(refresher)
        .build()
        .expect("client should build");
    Arc::new(client)
}

/// Success envelope around `data`.
pub fn envelope(data: Value) -> Value {
    json!({"code": 200, "success": true, "message": "ok", "data": data, "redirect": null})
}

/// Refresher with a fixed outcome and an artificial delay, counting calls.
pub struct ScriptedRefresher {
    calls: AtomicUsize,
    store: Arc<CredentialStore>,
    outcome: Result<String, String>,
    delay: Duration,
}

impl ScriptedRefresher {
    pub fn succeeding(store: Arc<CredentialStore>, token: &str, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            store,
            outcome: Ok(token.to_string()),
            delay,
        })
    }

    pub fn failing(store: Arc<CredentialStore>, message: &str, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            store,
            outcome: Err(message.to_string()),
            delay,
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenRefresher for ScriptedRefresher {
    async fn refresh(&self) -> Result<String, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        match &self.outcome {
            Ok(token) => {
                self.store.set_access_token(token.clone()).await;
                Ok(token.clone())
            }
            Err(message) => Err(ApiError::SessionExpired(message.clone())),
        }
    }
}

/// Formatted log output captured for the current thread.
#[derive(Clone, Default)]
pub struct LogHandle {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl LogHandle {
    pub fn output(&self) -> String {
        let guard = self.buffer.lock().expect("log mutex poisoned");
        String::from_utf8_lossy(&guard).into_owned()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.output().contains(needle)
    }
}

impl io::Write for LogHandle {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().expect("log mutex poisoned").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Route `tracing` output at debug level into a buffer until the guard is
/// dropped. Only covers the current thread, so pair it with a current-thread
/// runtime.
pub fn capture_logs() -> (LogHandle, DefaultGuard) {
    let handle = LogHandle::default();
    let writer = handle.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (handle, guard)
}
