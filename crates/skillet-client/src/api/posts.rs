//! Post endpoints.

use crate::client::ApiClient;
use serde::Serialize;
use skillet_core::error::Result;
use skillet_core::model::{MediaType, Post};
use std::sync::Arc;

/// Typed wrapper over `/api/posts`.
#[derive(Clone)]
pub struct PostsApi {
    client: Arc<ApiClient>,
}

impl PostsApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Post>> {
        self.client.get_json("/api/posts").await
    }

    pub async fn get(&self, post_id: &str) -> Result<Post> {
        self.client.get_json(&format!("/api/posts/by-id/{post_id}")).await
    }

    pub async fn by_user(&self, user_id: &str) -> Result<Vec<Post>> {
        self.client.get_json(&format!("/api/posts/user/{user_id}")).await
    }

    pub async fn create(&self, post: &NewPost) -> Result<Post> {
        self.client.post_json("/api/posts", post).await
    }

    pub async fn update(&self, post_id: &str, update: &PostUpdate) -> Result<Post> {
        self.client
            .put_json(&format!("/api/posts/by-id/{post_id}"), update)
            .await
    }

    pub async fn delete(&self, post_id: &str) -> Result<()> {
        self.client.delete(&format!("/api/posts/by-id/{post_id}")).await
    }
}

/// Payload for creating a post; `media_urls` comes from a completed upload
/// batch, never from a partial one.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub media_urls: Vec<String>,
    pub media_type: MediaType,
}

/// Editable post fields.
#[derive(Debug, Clone, Serialize)]
pub struct PostUpdate {
    pub title: String,
    pub description: String,
}
