//! Learning plan endpoints.

use crate::client::ApiClient;
use skillet_core::error::Result;
use skillet_core::model::LearningPlan;
use std::sync::Arc;

/// Typed wrapper over `/api/plan`.
#[derive(Clone)]
pub struct PlansApi {
    client: Arc<ApiClient>,
}

impl PlansApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<LearningPlan>> {
        self.client.get_json("/api/plan").await
    }

    pub async fn get(&self, plan_id: &str) -> Result<LearningPlan> {
        self.client.get_json(&format!("/api/plan/{plan_id}")).await
    }

    pub async fn create(&self, plan: &LearningPlan) -> Result<LearningPlan> {
        self.client.post_json("/api/plan", plan).await
    }

    pub async fn update(&self, plan_id: &str, plan: &LearningPlan) -> Result<LearningPlan> {
        self.client.put_json(&format!("/api/plan/{plan_id}"), plan).await
    }

    pub async fn delete(&self, plan_id: &str) -> Result<()> {
        self.client.delete(&format!("/api/plan/{plan_id}")).await
    }
}
