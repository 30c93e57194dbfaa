//! Notification bootstrap
//!
//! The first page of notifications comes over HTTP; everything after that
//! arrives on a publish/subscribe channel keyed by user. The channel itself
//! is a collaborator supplied by the caller.

use async_trait::async_trait;
use leadflow_domain::constants::{NOTIFICATION_FIRST_PAGE_LIMIT, NOTIFICATION_TOPIC_PREFIX};
use leadflow_domain::{Notification, PageQuery};
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{info, instrument, warn};

use super::commands::ApiCommands;
use super::errors::ApiError;

/// Trait for the live notification transport
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    /// Start receiving event payloads published on `topic`.
    async fn subscribe(&self, topic: &str) -> Result<mpsc::Receiver<Value>, ApiError>;
}

/// Initial notifications plus the live feed that follows them
#[derive(Debug)]
pub struct NotificationFeed {
    pub initial: Vec<Notification>,
    pub updates: mpsc::Receiver<Value>,
}

/// Topic carrying events for one user
pub fn user_topic(user_id: &str) -> String {
    format!("{NOTIFICATION_TOPIC_PREFIX}{user_id}")
}

/// Load the first page of notifications and subscribe to the user's topic.
///
/// A failed first page is logged and yields an empty initial list; the
/// subscription is attempted regardless.
///
/// # Errors
///
/// Returns the channel's error if the subscription fails
#[instrument(skip(commands, channel))]
pub async fn bootstrap_notifications(
    commands: &ApiCommands,
    channel: &dyn NotificationChannel,
    user_id: &str,
) -> Result<NotificationFeed, ApiError> {
    let first_page = PageQuery::offset(0, NOTIFICATION_FIRST_PAGE_LIMIT);
    let initial = match commands.list_notifications(first_page).await {
        Ok(response) => response.data.data,
        Err(e) => {
            warn!(error = %e, category = ?e.category(), "failed to load initial notifications");
            Vec::new()
        }
    };

    let topic = user_topic(user_id);
    let updates = channel.subscribe(&topic).await?;
    info!(topic = %topic, initial = initial.len(), "notification feed ready");

    Ok(NotificationFeed { initial, updates })
}
