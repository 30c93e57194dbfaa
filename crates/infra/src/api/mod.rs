//! Authenticated Leadflow API client
//!
//! Builds on the [`crate::http`] transport. Every request gets the current
//! bearer credential, failures are normalized into [`ApiError`], and a 401 is
//! answered with a single coordinated credential refresh followed by one
//! replay of each rejected request.
//!
//! # Layout
//!
//! - [`client`]: dispatch, classification, refresh and replay
//! - [`auth`]: credential source, in-memory store, injector
//! - [`normalize`]: server error-message extraction
//! - [`refresh`]: IDLE/REFRESHING coordinator and waiter queue
//! - [`session`]: refresh-token exchange against the backend
//! - [`endpoints`]: path catalog
//! - [`commands`]: one method per backend operation
//! - [`feed`]: notification bootstrap

pub mod auth;
pub mod client;
pub mod commands;
pub mod endpoints;
pub mod errors;
pub mod feed;
pub mod normalize;
pub mod refresh;
pub mod session;

pub use auth::{AuthInjector, CredentialSource, CredentialStore, TokenRefresher};
pub use client::{ApiClient, ApiClientBuilder};
pub use commands::ApiCommands;
pub use errors::{ApiError, ApiErrorCategory, Failure};
pub use feed::{bootstrap_notifications, NotificationChannel, NotificationFeed};
pub use normalize::{extract_message, normalize};
pub use refresh::{RefreshCoordinator, RefreshRole, RefreshState};
pub use session::SessionRefresher;
