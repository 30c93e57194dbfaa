//! Admin moderation listings

use leadflow_domain::{
    BugFilters, BugReport, Feedback, FeedbackFilters, GenericResponse, UserFilters, UsersPage,
};
use tracing::{debug, instrument};

use super::ApiCommands;
use crate::api::endpoints;
use crate::api::errors::ApiError;

impl ApiCommands {
    /// List users for moderation
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Auth` when the caller is not an admin
    #[instrument(skip(self, filters), fields(page = filters.page))]
    pub async fn list_users(
        &self,
        filters: &UserFilters,
    ) -> Result<GenericResponse<UsersPage>, ApiError> {
        let response: GenericResponse<UsersPage> =
            self.client.get(&endpoints::auth::users(filters)).await?;
        debug!(total = response.data.total_count, "users listed");
        Ok(response)
    }

    #[instrument(skip(self, filters), fields(page = filters.page))]
    pub async fn list_bug_reports(
        &self,
        filters: &BugFilters,
    ) -> Result<GenericResponse<Vec<BugReport>>, ApiError> {
        self.client.get(&endpoints::admin::bugs(filters)).await
    }

    #[instrument(skip(self, filters), fields(page = filters.page))]
    pub async fn list_feedback(
        &self,
        filters: &FeedbackFilters,
    ) -> Result<GenericResponse<Vec<Feedback>>, ApiError> {
        self.client.get(&endpoints::admin::feedback(filters)).await
    }
}
