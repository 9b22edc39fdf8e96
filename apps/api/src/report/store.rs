use anyhow::Result;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::report::ReadinessReportRow;
use crate::report::readiness::ReadinessReport;

pub async fn insert_report(
    pool: &PgPool,
    user_id: Uuid,
    analysis_id: Uuid,
    attempt_id: Option<Uuid>,
    report: &ReadinessReport,
) -> Result<ReadinessReportRow> {
    let row = sqlx::query_as::<_, ReadinessReportRow>(
        r#"
        INSERT INTO readiness_reports
            (id, user_id, analysis_id, attempt_id, report, total_score)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(analysis_id)
    .bind(attempt_id)
    .bind(serde_json::to_value(report)?)
    .bind(report.metrics.total_score as i32)
    .fetch_one(pool)
    .await?;

    info!(
        "Stored readiness report {} for user {} (total {})",
        row.id, row.user_id, report.metrics.total_score
    );
    Ok(row)
}

pub async fn get_report(pool: &PgPool, id: Uuid) -> Result<Option<ReadinessReportRow>> {
    let row =
        sqlx::query_as::<_, ReadinessReportRow>("SELECT * FROM readiness_reports WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(row)
}

impl ReadinessReportRow {
    pub fn readiness_report(&self) -> Result<ReadinessReport> {
        Ok(serde_json::from_value(self.report.clone())?)
    }
}
