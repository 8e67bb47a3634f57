//! Learning progress endpoints.

use crate::client::ApiClient;
use skillet_core::error::Result;
use skillet_core::model::LearningProgress;
use std::sync::Arc;

/// Typed wrapper over `/api/progress`.
#[derive(Clone)]
pub struct ProgressApi {
    client: Arc<ApiClient>,
}

impl ProgressApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<LearningProgress>> {
        self.client.get_json("/api/progress").await
    }

    pub async fn get(&self, progress_id: &str) -> Result<LearningProgress> {
        self.client.get_json(&format!("/api/progress/{progress_id}")).await
    }

    pub async fn by_user(&self, user_id: &str) -> Result<Vec<LearningProgress>> {
        self.client.get_json(&format!("/api/progress/user/{user_id}")).await
    }

    pub async fn create(&self, entry: &LearningProgress) -> Result<LearningProgress> {
        self.client.post_json("/api/progress", entry).await
    }

    pub async fn update(
        &self,
        progress_id: &str,
        entry: &LearningProgress,
    ) -> Result<LearningProgress> {
        self.client
            .put_json(&format!("/api/progress/{progress_id}"), entry)
            .await
    }

    pub async fn delete(&self, progress_id: &str) -> Result<()> {
        self.client.delete(&format!("/api/progress/{progress_id}")).await
    }
}
