//! Paged notification feed.

use skillet_client::api::NotificationsApi;
use skillet_core::error::Result;
use skillet_core::model::Notification;

const DEFAULT_PAGE_SIZE: u32 = 20;

/// The viewer's notification list with paging and an unread badge count.
pub struct NotificationFeed {
    api: NotificationsApi,
    user_id: String,
    notifications: Vec<Notification>,
    unread_count: u64,
    next_page: u32,
    page_size: u32,
}

impl NotificationFeed {
    pub fn new(api: NotificationsApi, user_id: impl Into<String>) -> Self {
        Self {
            api,
            user_id: user_id.into(),
            notifications: Vec::new(),
            unread_count: 0,
            next_page: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn unread_count(&self) -> u64 {
        self.unread_count
    }

    /// Reloads the first page. Fetching marks the returned entries read on
    /// the server, so the unread badge is refreshed afterwards.
    pub async fn refresh(&mut self) -> Result<()> {
        self.notifications = self
            .api
            .list(&self.user_id, false, 0, self.page_size)
            .await?;
        self.next_page = 1;
        self.refresh_unread_count().await
    }

    /// Appends the next page, newest first.
    pub async fn load_more(&mut self) -> Result<()> {
        let page = self
            .api
            .list(&self.user_id, false, self.next_page, self.page_size)
            .await?;
        if !page.is_empty() {
            self.next_page += 1;
            self.notifications.extend(page);
        }
        Ok(())
    }

    /// Refreshes the unread badge count only.
    pub async fn refresh_unread_count(&mut self) -> Result<()> {
        self.unread_count = self.api.unread_count(&self.user_id).await?;
        Ok(())
    }
}
