//! Domain types and models
//!
//! Wire shapes exchanged with the Leadflow backend. Field names follow the
//! backend's JSON (mixed snake and camel case) via serde attributes so the
//! Rust side stays snake_case.

pub mod admin;
pub mod auth;
pub mod envelope;
pub mod leads;
pub mod notifications;
pub mod support;
pub mod user;

pub use admin::{BugFilters, FeedbackFilters, UserFilters, UsersPage};
pub use auth::{
    AuthSession, ChangePasswordInput, ForgotPasswordInput, GoogleLoginInput, LoginInput,
    RegisterInput, ResendOtpInput, ResetPasswordInput, VerifyOtpInput,
};
pub use envelope::{GenericResponse, PageOf, PageQuery, Pagination};
pub use leads::{
    BulkDeleteLeadsPayload, CreateLeadPayload, DownloadLeadsParams, Lead, LeadCharts, LeadStats,
    LeadType, LeadsListParams, LeadsSummary, LeadsSummaryParams, UpdateLeadPayload,
};
pub use notifications::{
    BulkDeleteNotificationsPayload, CreateNotificationPayload, Notification, NotificationPage,
};
pub use support::{BugReport, CreateBugPayload, CreateFeedbackPayload, Feedback, Reporter};
pub use user::{UpdateProfilePayload, User};
