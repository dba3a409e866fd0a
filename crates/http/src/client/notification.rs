//! Notification API client methods

use super::{AuthenticatedHttpClient, ClientError};
use crate::types::{
    MarkAllReadResponse, MessageResponse, Notification, NotificationQuery, UnreadCountResponse,
};
use reqwest::Method;

impl AuthenticatedHttpClient {
    /// List notifications for the signed-in user
    pub async fn list_notifications(
        &self,
        query: &NotificationQuery,
    ) -> Result<Vec<Notification>, ClientError> {
        let request = self.request(Method::GET, "/notification/").query(query);
        self.execute(request).await
    }

    pub async fn get_notification(&self, id: i64) -> Result<Notification, ClientError> {
        self.get(&format!("/notification/{id}")).await
    }

    /// Mark one notification as read
    pub async fn mark_notification_read(&self, id: i64) -> Result<Notification, ClientError> {
        let request = self.request(Method::PATCH, &format!("/notification/{id}/read"));
        self.execute(request).await
    }

    pub async fn delete_notification(&self, id: i64) -> Result<MessageResponse, ClientError> {
        self.delete(&format!("/notification/{id}")).await
    }

    /// Number of notifications not read yet
    pub async fn unread_notification_count(&self) -> Result<u64, ClientError> {
        let response: UnreadCountResponse = self.get("/notification/unread/count").await?;
        Ok(response.unread_count)
    }

    /// Mark every sent notification as read
    pub async fn mark_all_notifications_read(&self) -> Result<MarkAllReadResponse, ClientError> {
        let request = self.request(Method::POST, "/notification/mark-all-read");
        self.execute(request).await
    }
}
