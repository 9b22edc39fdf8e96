//! Axum route handlers for the Quiz API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::models::JobDetails;
use crate::errors::AppError;
use crate::models::quiz::QuestionSetRow;
use crate::quiz::generator::generate_questions;
use crate::quiz::grading::{grade, QuizResults, QuizSubmission};
use crate::quiz::models::QuizView;
use crate::quiz::store::{get_question_set, insert_attempt, insert_question_set};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateQuizRequest {
    pub user_id: Uuid,
    pub job: JobDetails,
}

#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub question_set_id: Uuid,
    pub quiz: QuizView,
}

#[derive(Debug, Serialize)]
pub struct AttemptResponse {
    pub attempt_id: Uuid,
    pub results: QuizResults,
}

/// POST /api/v1/quizzes
///
/// Generates a screening quiz for a job. Unlike analysis, a provider failure
/// or an invalid question set fails the request.
pub async fn handle_create_quiz(
    State(state): State<AppState>,
    Json(request): Json<CreateQuizRequest>,
) -> Result<Json<QuizResponse>, AppError> {
    if request.job.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job.job_description cannot be empty".to_string(),
        ));
    }

    let set = generate_questions(state.generator.as_ref(), &request.job).await?;
    let row = insert_question_set(&state.db, request.user_id, &request.job, &set).await?;

    Ok(Json(QuizResponse {
        question_set_id: row.id,
        quiz: QuizView::from(&set),
    }))
}

/// GET /api/v1/quizzes/:id
///
/// Serves the quiz without answer keys.
pub async fn handle_get_quiz(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<QuizResponse>, AppError> {
    let row = load_question_set(&state, id).await?;
    let set = row.question_set()?;
    Ok(Json(QuizResponse {
        question_set_id: row.id,
        quiz: QuizView::from(&set),
    }))
}

/// POST /api/v1/quizzes/:id/attempts
pub async fn handle_submit_attempt(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(submission): Json<QuizSubmission>,
) -> Result<Json<AttemptResponse>, AppError> {
    let row = load_question_set(&state, id).await?;
    let set = row.question_set()?;

    let results =
        grade(&set, &submission).map_err(|e| AppError::Validation(e.to_string()))?;
    let attempt = insert_attempt(&state.db, row.id, submission.user_id, &results).await?;

    Ok(Json(AttemptResponse {
        attempt_id: attempt.id,
        results,
    }))
}

async fn load_question_set(state: &AppState, id: Uuid) -> Result<QuestionSetRow, AppError> {
    get_question_set(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Question set {id} not found")))
}
