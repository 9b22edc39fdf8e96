use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeAnalysisRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub job_title: Option<String>,
    /// Schema-valid `AnalysisResult` JSON.
    pub result: Value,
    /// "parsed" | "repaired" | "extracted" | "fallback"
    pub analysis_path: String,
    pub failure_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}
