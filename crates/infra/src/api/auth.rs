//! Credential access and injection
//!
//! The credential is read fresh at every dispatch through
//! [`CredentialSource`]; nothing caches it beyond the construction of one
//! request. [`CredentialStore`] is the in-memory session holder and the only
//! writer of the credential.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::errors::ApiError;
use crate::http::HeaderWriter;

/// Trait for reading the current bearer credential
///
/// `None` means "not signed in"; requests then go out unauthenticated.
#[async_trait]
pub trait CredentialSource: Send + Sync {
    async fn access_token(&self) -> Option<String>;
}

/// Trait for exchanging an expired credential for a new one
#[async_trait]
pub trait TokenRefresher: Send + Sync {
    /// Obtain a fresh access token.
    ///
    /// Implementations are responsible for storing the new credential where
    /// the [`CredentialSource`] will see it.
    async fn refresh(&self) -> Result<String, ApiError>;
}

#[derive(Debug, Default)]
struct Tokens {
    access: Option<String>,
    refresh: Option<String>,
}

/// In-memory session holding the access and refresh tokens
#[derive(Debug, Default)]
pub struct CredentialStore {
    tokens: RwLock<Tokens>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store both tokens after a successful sign-in.
    pub async fn set_tokens(&self, access: impl Into<String>, refresh: Option<String>) {
        let mut tokens = self.tokens.write().await;
        tokens.access = Some(access.into());
        tokens.refresh = refresh;
    }

    /// Replace only the access token, e.g. after a refresh.
    pub async fn set_access_token(&self, access: impl Into<String>) {
        self.tokens.write().await.access = Some(access.into());
    }

    /// Forget the session (sign-out).
    pub async fn clear(&self) {
        *self.tokens.write().await = Tokens::default();
    }

    pub async fn refresh_token(&self) -> Option<String> {
        self.tokens.read().await.refresh.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.tokens.read().await.access.is_some()
    }
}

#[async_trait]
impl CredentialSource for CredentialStore {
    async fn access_token(&self) -> Option<String> {
        self.tokens.read().await.access.clone()
    }
}

/// Attaches the current credential to outgoing requests
#[derive(Clone)]
pub struct AuthInjector {
    source: Arc<dyn CredentialSource>,
}

impl AuthInjector {
    pub fn new(source: Arc<dyn CredentialSource>) -> Self {
        Self { source }
    }

    /// Write `Authorization: Bearer <token>` when a credential is present.
    ///
    /// Returns whether a credential was attached. An absent credential is not
    /// an error.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Config` if the credential is not a valid header
    /// value.
    pub async fn inject(
        &self,
        headers: &mut (dyn HeaderWriter + Send),
    ) -> Result<bool, ApiError> {
        let Some(token) = self.source.access_token().await else {
            debug!(attached = false, "no credential available");
            return Ok(false);
        };
        headers.set("Authorization", &format!("Bearer {token}"))?;
        debug!(attached = true, "credential attached");
        Ok(true)
    }
}
