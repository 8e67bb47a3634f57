//! Learning plan and progress models.

use serde::{Deserialize, Serialize};

/// One step in a learning plan's timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineStep {
    pub step: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub completed: bool,
}

/// A structured learning plan (e.g. a multi-week course outline).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningPlan {
    #[serde(default)]
    pub id: Option<String>,
    pub user_id: String,
    #[serde(default)]
    pub template_type: Option<String>,
    #[serde(default)]
    pub course_name: Option<String>,
    pub title: String,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub date_created: Option<String>,
    #[serde(default)]
    pub last_modified: Option<String>,
    #[serde(default)]
    pub timeline: Vec<TimelineStep>,
}

/// A free-form progress log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningProgress {
    #[serde(default)]
    pub id: Option<String>,
    pub user_id: String,
    #[serde(default)]
    pub template_type: Option<String>,
    #[serde(default)]
    pub course_name: Option<String>,
    pub title: String,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub date_created: Option<String>,
    #[serde(default)]
    pub last_modified: Option<String>,
}
