use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ReadinessReportRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub analysis_id: Uuid,
    pub attempt_id: Option<Uuid>,
    /// `ReadinessReport` JSON.
    pub report: Value,
    pub total_score: i32,
    pub created_at: DateTime<Utc>,
}
