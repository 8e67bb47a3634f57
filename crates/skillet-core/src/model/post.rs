//! Post domain model.

use super::upload::MediaType;
use serde::{Deserialize, Serialize};

/// A published post.
///
/// Timestamps are kept as the ISO 8601 strings the backend emits; the
/// client never does arithmetic on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    /// Numeric display id assigned by the backend; likes are keyed by it.
    #[serde(default)]
    pub post_id: Option<u64>,
    pub user_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub media_urls: Vec<String>,
    pub media_type: MediaType,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}
