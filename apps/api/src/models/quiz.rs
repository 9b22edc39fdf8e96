use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct QuestionSetRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub job_title: Option<String>,
    pub job_description: String,
    /// `QuestionSet` JSON, answer keys included. Never sent to clients as-is.
    pub questions: Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct QuizAttemptRow {
    pub id: Uuid,
    pub question_set_id: Uuid,
    pub user_id: Uuid,
    /// `QuizResults` JSON.
    pub results: Value,
    pub score: i32,
    pub created_at: DateTime<Utc>,
}
