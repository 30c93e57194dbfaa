//! Domain call wrappers
//!
//! One async method per backend operation. Each picks the HTTP method and
//! catalog path, sends through [`ApiClient`] and returns the decoded
//! success envelope. Inputs are trusted as typed; the backend does the
//! semantic validation.

mod account;
mod admin;
mod auth;
mod leads;
mod notifications;

use std::sync::Arc;

use leadflow_domain::AuthSession;
use tracing::debug;

use super::auth::CredentialStore;
use super::client::ApiClient;

/// API commands for domain operations
pub struct ApiCommands {
    client: Arc<ApiClient>,
    session: Option<Arc<CredentialStore>>,
}

impl ApiCommands {
    /// Create a new commands instance
    ///
    /// # Arguments
    ///
    /// * `client` - API client
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client, session: None }
    }

    /// Commands that also keep `store` in step with sign-in and sign-out.
    pub fn with_session(client: Arc<ApiClient>, store: Arc<CredentialStore>) -> Self {
        Self { client, session: Some(store) }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    async fn remember(&self, session: &AuthSession) {
        let (Some(store), Some(access)) = (&self.session, &session.access_token) else {
            return;
        };
        store.set_tokens(access.clone(), session.refresh_token.clone()).await;
        debug!(has_refresh = session.refresh_token.is_some(), "session stored");
    }

    async fn forget(&self) {
        if let Some(store) = &self.session {
            store.clear().await;
            debug!("session cleared");
        }
    }
}
