//! Learning plan and progress usecases.
//!
//! Thin typed flows over the plan/progress APIs; deletions go through the
//! same staged-confirmation gate as every other destructive operation.

use crate::confirm::DeleteTicket;
use skillet_client::api::{PlansApi, ProgressApi};
use skillet_core::error::{Result, SkilletError};
use skillet_core::model::{LearningPlan, LearningProgress};

/// CRUD flows for learning plans.
pub struct LearningPlanService {
    api: PlansApi,
}

impl LearningPlanService {
    pub fn new(api: PlansApi) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<LearningPlan>> {
        self.api.list().await
    }

    pub async fn get(&self, plan_id: &str) -> Result<LearningPlan> {
        self.api.get(plan_id).await
    }

    pub async fn create(&self, plan: &LearningPlan) -> Result<LearningPlan> {
        validate_title(&plan.title)?;
        self.api.create(plan).await
    }

    pub async fn update(&self, plan_id: &str, plan: &LearningPlan) -> Result<LearningPlan> {
        validate_title(&plan.title)?;
        self.api.update(plan_id, plan).await
    }

    /// Stages a deletion for user confirmation.
    pub fn stage_delete(&self, plan_id: &str) -> DeleteTicket {
        DeleteTicket::new(plan_id)
    }

    pub async fn confirm_delete(&self, ticket: DeleteTicket) -> Result<()> {
        self.api.delete(ticket.target_id()).await
    }
}

/// CRUD flows for progress log entries.
pub struct LearningProgressService {
    api: ProgressApi,
}

impl LearningProgressService {
    pub fn new(api: ProgressApi) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<LearningProgress>> {
        self.api.list().await
    }

    pub async fn by_user(&self, user_id: &str) -> Result<Vec<LearningProgress>> {
        self.api.by_user(user_id).await
    }

    pub async fn create(&self, entry: &LearningProgress) -> Result<LearningProgress> {
        validate_title(&entry.title)?;
        self.api.create(entry).await
    }

    pub async fn update(
        &self,
        progress_id: &str,
        entry: &LearningProgress,
    ) -> Result<LearningProgress> {
        validate_title(&entry.title)?;
        self.api.update(progress_id, entry).await
    }

    /// Stages a deletion for user confirmation.
    pub fn stage_delete(&self, progress_id: &str) -> DeleteTicket {
        DeleteTicket::new(progress_id)
    }

    pub async fn confirm_delete(&self, ticket: DeleteTicket) -> Result<()> {
        self.api.delete(ticket.target_id()).await
    }
}

fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(SkilletError::validation("title is required"));
    }
    Ok(())
}
