//! Notification types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::envelope::PageOf;

/// A notification delivered to a user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: Option<String>,
    pub message: Option<String>,
    #[serde(rename = "type")]
    pub notification_type: Option<String>,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub user_id: Option<serde_json::Value>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
    /// Fields the backend adds that have no typed counterpart here
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Paginated notifications nested under the envelope's `data`
pub type NotificationPage = PageOf<Notification>;

/// Payload for creating a notification (admin / system)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateNotificationPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub title: String,
    pub message: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub notification_type: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkDeleteNotificationsPayload {
    #[serde(rename = "notificationIds")]
    pub notification_ids: Vec<String>,
}
