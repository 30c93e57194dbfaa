//! Dashboard, profile and support submissions

use leadflow_domain::{
    CreateBugPayload, CreateFeedbackPayload, GenericResponse, UpdateProfilePayload,
};
use serde_json::Value;
use tracing::instrument;

use super::ApiCommands;
use crate::api::endpoints;
use crate::api::errors::ApiError;

impl ApiCommands {
    #[instrument(skip(self))]
    pub async fn fetch_dashboard(&self) -> Result<GenericResponse<Value>, ApiError> {
        self.client.get(endpoints::dashboard::GET).await
    }

    /// Update the signed-in user's profile. Only set fields are sent.
    #[instrument(skip(self, payload))]
    pub async fn update_profile(
        &self,
        payload: &UpdateProfilePayload,
    ) -> Result<GenericResponse<Value>, ApiError> {
        self.client.put(endpoints::user::UPDATE, payload).await
    }

    #[instrument(skip(self, payload), fields(user_id = %payload.user_id))]
    pub async fn create_bug(
        &self,
        payload: &CreateBugPayload,
    ) -> Result<GenericResponse<Value>, ApiError> {
        self.client.post(endpoints::support::BUG_CREATE, payload).await
    }

    #[instrument(skip(self, payload), fields(user_id = %payload.user_id))]
    pub async fn create_feedback(
        &self,
        payload: &CreateFeedbackPayload,
    ) -> Result<GenericResponse<Value>, ApiError> {
        self.client.post(endpoints::support::FEEDBACK_CREATE, payload).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::api::commands::test_support::{commands_for, envelope};

    #[tokio::test]
    async fn update_profile_is_a_put_without_unset_fields() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/user/update"))
            .and(body_json(json!({"first_name": "Ada"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({"_id": "u1"}))))
            .expect(1)
            .mount(&server)
            .await;

        let (commands, _) = commands_for(&server).await;
        let payload = UpdateProfilePayload { first_name: Some("Ada".into()), ..Default::default() };
        let response = commands.update_profile(&payload).await.unwrap();
        assert_eq!(response.data["_id"], "u1");
    }

    #[tokio::test]
    async fn bug_report_posts_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/bug/create"))
            .and(body_json(json!({"user_id": "u1", "bug": "Export hangs"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(envelope(json!({"_id": "b1"}))))
            .expect(1)
            .mount(&server)
            .await;

        let (commands, _) = commands_for(&server).await;
        let payload = CreateBugPayload { user_id: "u1".into(), bug: "Export hangs".into() };
        commands.create_bug(&payload).await.unwrap();
    }

    #[tokio::test]
    async fn dashboard_failure_is_normalized() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/dashboard"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(json!({"error": "aggregation failed"})),
            )
            .mount(&server)
            .await;

        let (commands, _) = commands_for(&server).await;
        let err = commands.fetch_dashboard().await.unwrap_err();
        assert_eq!(err.message(), "aggregation failed");
        assert_eq!(err.status().map(|s| s.as_u16()), Some(500));
    }
}
