//! Axum route handlers for the Analysis API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::analysis::models::{AnalysisPath, AnalysisRequest, AnalysisResult};
use crate::analysis::orchestrator::analyze;
use crate::analysis::store::{get_analysis, insert_analysis};
use crate::errors::AppError;
use crate::models::analysis::ResumeAnalysisRow;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub analysis_id: Uuid,
    pub result: AnalysisResult,
    pub path: AnalysisPath,
}

/// POST /api/v1/analyses
///
/// Analyzes a résumé against a job. Model failures never fail this request:
/// the response always carries a schema-valid result.
pub async fn handle_create_analysis(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> Result<Json<AnalysisResponse>, AppError> {
    validate_request(&request)?;

    let outcome = analyze(state.generator.as_ref(), &request).await;
    let row = insert_analysis(&state.db, &request, &outcome).await?;

    Ok(Json(AnalysisResponse {
        analysis_id: row.id,
        result: outcome.result,
        path: outcome.path,
    }))
}

/// GET /api/v1/analyses/:id
pub async fn handle_get_analysis(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ResumeAnalysisRow>, AppError> {
    let row = get_analysis(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Analysis {id} not found")))?;
    Ok(Json(row))
}

fn validate_request(request: &AnalysisRequest) -> Result<(), AppError> {
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation("resume_text cannot be empty".to_string()));
    }
    let has_title = request
        .job
        .job_title
        .as_deref()
        .is_some_and(|t| !t.trim().is_empty());
    if !has_title && request.job.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job requires a job_title or job_description".to_string(),
        ));
    }
    Ok(())
}
