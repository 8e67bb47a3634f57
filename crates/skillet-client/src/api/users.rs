//! User lookup endpoints.

use crate::client::ApiClient;
use skillet_core::error::Result;
use skillet_core::model::UserSummary;
use std::sync::Arc;

/// Typed wrapper over `/api/users`.
#[derive(Clone)]
pub struct UsersApi {
    client: Arc<ApiClient>,
}

impl UsersApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn get(&self, user_id: &str) -> Result<UserSummary> {
        self.client.get_json(&format!("/api/users/{user_id}")).await
    }

    pub async fn search(&self, query: &str) -> Result<Vec<UserSummary>> {
        self.client
            .get_json(&format!("/api/users/search?query={query}"))
            .await
    }
}
