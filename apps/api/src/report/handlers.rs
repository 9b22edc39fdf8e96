//! Axum route handlers for the Report API.

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::store::get_analysis;
use crate::errors::AppError;
use crate::quiz::store::get_attempt;
use crate::report::markdown::render_markdown;
use crate::report::readiness::{build_report, ReadinessReport};
use crate::report::store::{get_report, insert_report};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateReportRequest {
    pub user_id: Uuid,
    pub analysis_id: Uuid,
    #[serde(default)]
    pub attempt_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub report_id: Uuid,
    pub report: ReadinessReport,
}

/// POST /api/v1/reports
///
/// Combines a stored analysis with an optional quiz attempt.
pub async fn handle_create_report(
    State(state): State<AppState>,
    Json(request): Json<CreateReportRequest>,
) -> Result<Json<ReportResponse>, AppError> {
    let analysis = get_analysis(&state.db, request.analysis_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Analysis {} not found", request.analysis_id))
        })?
        .analysis_result()?;

    let quiz = match request.attempt_id {
        Some(attempt_id) => Some(
            get_attempt(&state.db, attempt_id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Quiz attempt {attempt_id} not found")))?
                .quiz_results()?,
        ),
        None => None,
    };

    let report = build_report(analysis, quiz.as_ref());
    let row = insert_report(
        &state.db,
        request.user_id,
        request.analysis_id,
        request.attempt_id,
        &report,
    )
    .await?;

    Ok(Json(ReportResponse {
        report_id: row.id,
        report,
    }))
}

/// GET /api/v1/reports/:id
pub async fn handle_get_report(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ReportResponse>, AppError> {
    let report = load_report(&state, id).await?;
    Ok(Json(ReportResponse {
        report_id: id,
        report,
    }))
}

/// GET /api/v1/reports/:id/markdown
pub async fn handle_get_report_markdown(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let report = load_report(&state, id).await?;
    Ok((
        [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
        render_markdown(&report),
    ))
}

async fn load_report(state: &AppState, id: Uuid) -> Result<ReadinessReport, AppError> {
    let row = get_report(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Report {id} not found")))?;
    Ok(row.readiness_report()?)
}
