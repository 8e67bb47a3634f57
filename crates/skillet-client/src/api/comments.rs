//! Comment endpoints.

use crate::client::ApiClient;
use serde::Serialize;
use skillet_core::error::Result;
use skillet_core::model::Comment;
use std::sync::Arc;

/// Typed wrapper over `/api/comments`.
#[derive(Clone)]
pub struct CommentsApi {
    client: Arc<ApiClient>,
}

impl CommentsApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Comments for a post, in server insertion order.
    pub async fn list(&self, post_id: &str) -> Result<Vec<Comment>> {
        self.client.get_json(&format!("/api/comments/{post_id}")).await
    }

    /// Creates a comment; the response carries the server-assigned id and
    /// timestamp used to reconcile the local placeholder.
    pub async fn create(&self, post_id: &str, user_id: &str, content: &str) -> Result<Comment> {
        self.client
            .post_json(
                &format!("/api/comments/{post_id}"),
                &NewCommentRequest { user_id, content },
            )
            .await
    }

    pub async fn update(&self, comment_id: &str, content: &str) -> Result<Comment> {
        self.client
            .put_json(
                &format!("/api/comments/{comment_id}"),
                &EditCommentRequest { content },
            )
            .await
    }

    pub async fn delete(&self, comment_id: &str) -> Result<()> {
        self.client.delete(&format!("/api/comments/{comment_id}")).await
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NewCommentRequest<'a> {
    user_id: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct EditCommentRequest<'a> {
    content: &'a str,
}
