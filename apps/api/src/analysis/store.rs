use anyhow::Result;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::analysis::models::{AnalysisOutcome, AnalysisPath, AnalysisRequest, AnalysisResult};
use crate::models::analysis::ResumeAnalysisRow;

/// Persists one analysis outcome. Every outcome is stored, fallbacks included,
/// so a report can always be built on top of it.
pub async fn insert_analysis(
    pool: &PgPool,
    request: &AnalysisRequest,
    outcome: &AnalysisOutcome,
) -> Result<ResumeAnalysisRow> {
    let failure_reason = match outcome.path {
        AnalysisPath::Fallback { reason } => Some(reason.as_str()),
        _ => None,
    };

    let row = sqlx::query_as::<_, ResumeAnalysisRow>(
        r#"
        INSERT INTO resume_analyses
            (id, user_id, job_title, result, analysis_path, failure_reason)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(request.user_id)
    .bind(request.job.job_title.as_deref())
    .bind(serde_json::to_value(&outcome.result)?)
    .bind(outcome.path.label())
    .bind(failure_reason)
    .fetch_one(pool)
    .await?;

    info!("Stored analysis {} for user {}", row.id, row.user_id);
    Ok(row)
}

pub async fn get_analysis(pool: &PgPool, id: Uuid) -> Result<Option<ResumeAnalysisRow>> {
    let row = sqlx::query_as::<_, ResumeAnalysisRow>("SELECT * FROM resume_analyses WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

impl ResumeAnalysisRow {
    /// Decodes the stored result. Rows are only ever written from validated
    /// results, so a decode failure means the row was edited out of band.
    pub fn analysis_result(&self) -> Result<AnalysisResult> {
        Ok(serde_json::from_value(self.result.clone())?)
    }
}
