//! Comment domain model.

use serde::{Deserialize, Serialize};

/// A comment on a post.
///
/// Unique by `id`; display order is submission order and edits do not
/// reorder. While a creation is in flight the thread renders a placeholder
/// comment carrying a client-generated uuid, replaced in place by the
/// server's canonical comment on reconciliation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    #[serde(default)]
    pub post_id: Option<String>,
    pub user_id: String,
    #[serde(default)]
    pub username: Option<String>,
    pub content: String,
    #[serde(default)]
    pub created_at: Option<String>,
}
