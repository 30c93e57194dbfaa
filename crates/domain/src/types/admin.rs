//! Admin moderation filters and pages

use serde::{Deserialize, Serialize};

use super::user::User;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilters {
    pub page: u32,
    pub limit: u32,
    pub search: Option<String>,
    pub is_blocked: Option<bool>,
    pub is_deleted: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BugFilters {
    pub page: u32,
    pub limit: u32,
    pub search: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackFilters {
    pub page: u32,
    pub limit: u32,
    pub search: Option<String>,
    pub feedback_type: Option<String>,
    pub status: Option<String>,
    pub rating: Option<u8>,
}

/// Offset-paginated user listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UsersPage {
    pub total_count: u64,
    pub limit: u64,
    pub offset: u64,
    pub users: Vec<User>,
}
