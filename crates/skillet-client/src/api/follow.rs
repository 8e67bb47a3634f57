//! Follow endpoints.

use crate::client::ApiClient;
use serde::Deserialize;
use skillet_core::error::Result;
use std::sync::Arc;

/// Typed wrapper over `/api/follow`.
#[derive(Clone)]
pub struct FollowApi {
    client: Arc<ApiClient>,
}

impl FollowApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn follow(&self, follower_id: &str, following_id: &str) -> Result<()> {
        self.client
            .send(crate::request::ApiRequest::post(format!(
                "/api/follow/{follower_id}/{following_id}"
            )))
            .await?;
        Ok(())
    }

    pub async fn unfollow(&self, follower_id: &str, following_id: &str) -> Result<()> {
        self.client
            .delete(&format!("/api/follow/{follower_id}/{following_id}"))
            .await
    }

    pub async fn check(&self, follower_id: &str, following_id: &str) -> Result<bool> {
        let status: FollowStatus = self
            .client
            .get_json(&format!("/api/follow/check/{follower_id}/{following_id}"))
            .await?;
        Ok(status.is_following)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FollowStatus {
    is_following: bool,
}
