//! Notification feed models.

use serde::{Deserialize, Serialize};

/// The kind of interaction a notification reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NotificationKind {
    Like,
    Comment,
}

/// Post summary embedded in a notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPost {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

/// One entry in the notification feed: someone liked or commented on a
/// post the viewer owns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    /// Display name of the user who interacted.
    #[serde(default)]
    pub username: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    /// Comment content for comment notifications.
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub profile_picture: Option<String>,
    #[serde(default)]
    pub post: Option<NotificationPost>,
}
