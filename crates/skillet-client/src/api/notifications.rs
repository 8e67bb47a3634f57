//! Notification feed endpoints.

use crate::client::ApiClient;
use serde::Deserialize;
use skillet_core::error::Result;
use skillet_core::model::Notification;
use std::sync::Arc;

/// Typed wrapper over `/api/notifications`.
#[derive(Clone)]
pub struct NotificationsApi {
    client: Arc<ApiClient>,
}

impl NotificationsApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Fetches a page of the viewer's notifications, newest first.
    ///
    /// Fetching with `unread_only = false` marks the returned entries read
    /// on the server.
    pub async fn list(
        &self,
        user_id: &str,
        unread_only: bool,
        page: u32,
        size: u32,
    ) -> Result<Vec<Notification>> {
        self.client
            .get_json(&format!(
                "/api/notifications?userId={user_id}&unreadOnly={unread_only}&page={page}&size={size}"
            ))
            .await
    }

    pub async fn unread_count(&self, user_id: &str) -> Result<u64> {
        let count: UnreadCount = self
            .client
            .get_json(&format!("/api/notifications/unread/count?userId={user_id}"))
            .await?;
        Ok(count.count)
    }
}

#[derive(Deserialize)]
struct UnreadCount {
    count: u64,
}
