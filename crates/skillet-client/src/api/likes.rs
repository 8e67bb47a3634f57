//! Like endpoints.
//!
//! Like identity is the `(postId, userId)` pair; the backend keys the
//! count and the has-liked check by it.

use crate::client::ApiClient;
use serde::Serialize;
use skillet_core::error::Result;
use std::sync::Arc;

/// Typed wrapper over `/api/likes`.
#[derive(Clone)]
pub struct LikesApi {
    client: Arc<ApiClient>,
}

impl LikesApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn like(&self, post_id: &str, user_id: &str) -> Result<()> {
        self.client
            .send(
                crate::request::ApiRequest::post("/api/likes")
                    .json(&LikeRequest { post_id, user_id })?,
            )
            .await?;
        Ok(())
    }

    pub async fn unlike(&self, post_id: &str, user_id: &str) -> Result<()> {
        self.client
            .delete(&format!("/api/likes/by-post/{post_id}/user/{user_id}"))
            .await
    }

    pub async fn count_by_post(&self, post_id: &str) -> Result<u64> {
        self.client
            .get_json(&format!("/api/likes/count-by-post/{post_id}"))
            .await
    }

    pub async fn has_liked(&self, post_id: &str, user_id: &str) -> Result<bool> {
        self.client
            .get_json(&format!("/api/likes/by-post/{post_id}/user/{user_id}"))
            .await
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LikeRequest<'a> {
    post_id: &'a str,
    user_id: &'a str,
}
