use leadflow_domain::{
    BulkDeleteNotificationsPayload, CreateNotificationPayload, GenericResponse, Notification,
    NotificationPage, PageQuery,
};
use serde_json::{json, Value};
use tracing::{debug, instrument};

use super::ApiCommands;
use crate::api::endpoints;
use crate::api::errors::ApiError;

impl ApiCommands {
    /// The caller's notifications, newest first.
    #[instrument(skip(self))]
    pub async fn list_notifications(
        &self,
        page: PageQuery,
    ) -> Result<GenericResponse<NotificationPage>, ApiError> {
        let response: GenericResponse<NotificationPage> =
            self.client.get(&endpoints::notifications::get(page)).await?;
        debug!(count = response.data.data.len(), "notifications listed");
        Ok(response)
    }

    /// Every user's notifications (admin).
    #[instrument(skip(self))]
    pub async fn list_all_notifications(
        &self,
        page: PageQuery,
    ) -> Result<GenericResponse<NotificationPage>, ApiError> {
        self.client.get(&endpoints::notifications::get_all_admin(page)).await
    }

    #[instrument(skip(self, payload))]
    pub async fn create_notification(
        &self,
        payload: &CreateNotificationPayload,
    ) -> Result<GenericResponse<Notification>, ApiError> {
        self.client.post(endpoints::notifications::CREATE, payload).await
    }

    /// Create several notifications in one call; the body is a JSON array.
    #[instrument(skip(self, payloads), fields(count = payloads.len()))]
    pub async fn bulk_create_notifications(
        &self,
        payloads: &[CreateNotificationPayload],
    ) -> Result<GenericResponse<Vec<Notification>>, ApiError> {
        self.client.post(endpoints::notifications::BULK_CREATE, payloads).await
    }

    #[instrument(skip(self))]
    pub async fn mark_all_notifications_read(&self) -> Result<GenericResponse<Value>, ApiError> {
        self.client.patch(endpoints::notifications::MARK_ALL_READ, &json!({})).await
    }

    #[instrument(skip(self))]
    pub async fn mark_notification_read(
        &self,
        id: &str,
    ) -> Result<GenericResponse<Value>, ApiError> {
        self.client.patch(&endpoints::notifications::mark_one_read(id), &json!({})).await
    }

    #[instrument(skip(self))]
    pub async fn delete_all_notifications(&self) -> Result<GenericResponse<Value>, ApiError> {
        self.client.delete(endpoints::notifications::DELETE_ALL).await
    }

    #[instrument(skip(self))]
    pub async fn delete_notification(&self, id: &str) -> Result<GenericResponse<Value>, ApiError> {
        self.client.delete(&endpoints::notifications::delete_one(id)).await
    }

    #[instrument(skip(self, ids), fields(count = ids.len()))]
    pub async fn bulk_delete_notifications(
        &self,
        ids: Vec<String>,
    ) -> Result<GenericResponse<Value>, ApiError> {
        let payload = BulkDeleteNotificationsPayload { notification_ids: ids };
        self.client.post(endpoints::notifications::BULK_DELETE, &payload).await
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::api::commands::test_support::{commands_for, envelope};

    #[tokio::test]
    async fn list_reads_nested_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/notification"))
            .and(query_param("offset", "0"))
            .and(query_param("limit", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
                "data": [{"_id": "n1", "title": "New lead", "is_read": false}],
                "total": 1,
                "page": 1,
                "limit": 10,
                "totalPages": 1
            }))))
            .expect(1)
            .mount(&server)
            .await;

        let (commands, _) = commands_for(&server).await;
        let response = commands.list_notifications(PageQuery::offset(0, 10)).await.unwrap();

        assert_eq!(response.data.data.len(), 1);
        assert_eq!(response.data.data[0].id, "n1");
        assert_eq!(response.data.pagination.map(|p| p.total), Some(1));
    }

    #[tokio::test]
    async fn mark_one_read_patches_empty_object() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/api/notification/n1/read"))
            .and(body_json(json!({})))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(Value::Null)))
            .expect(1)
            .mount(&server)
            .await;

        let (commands, _) = commands_for(&server).await;
        commands.mark_notification_read("n1").await.unwrap();
    }

    #[tokio::test]
    async fn bulk_delete_posts_camel_case_ids() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/notification/bulk-delete"))
            .and(body_json(json!({"notificationIds": ["n1", "n2"]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(Value::Null)))
            .expect(1)
            .mount(&server)
            .await;

        let (commands, _) = commands_for(&server).await;
        commands.bulk_delete_notifications(vec!["n1".into(), "n2".into()]).await.unwrap();
    }

    #[tokio::test]
    async fn bulk_create_posts_an_array() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/notification/bulk-create"))
            .and(body_json(json!([
                {"user_id": "u1", "title": "Hi", "message": "one"},
                {"user_id": "u2", "title": "Hi", "message": "two"}
            ])))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(envelope(json!([{"_id": "n1"}, {"_id": "n2"}]))),
            )
            .expect(1)
            .mount(&server)
            .await;

        let (commands, _) = commands_for(&server).await;
        let payloads: Vec<CreateNotificationPayload> = ["u1", "u2"]
            .iter()
            .zip(["one", "two"])
            .map(|(user, message)| CreateNotificationPayload {
                user_id: Some((*user).to_string()),
                title: "Hi".into(),
                message: message.into(),
                ..Default::default()
            })
            .collect();

        let response = commands.bulk_create_notifications(&payloads).await.unwrap();
        assert_eq!(response.data.len(), 2);
    }

    #[tokio::test]
    async fn delete_one_embeds_id_in_path() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/notification/n9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(Value::Null)))
            .expect(1)
            .mount(&server)
            .await;

        let (commands, _) = commands_for(&server).await;
        commands.delete_notification("n9").await.unwrap();
    }
}
