//! Question generation: one model call, one decode, one validation.
//!
//! Unlike analysis there is no repair or salvage step. A question set that is
//! not fully valid is useless to the quiz taker, so every failure is surfaced.

use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::analysis::models::JobDetails;
use crate::analysis::validation::ValidationError;
use crate::errors::AppError;
use crate::llm_client::{strip_json_fences, LlmError, TextGenerator};
use crate::quiz::models::QuestionSet;
use crate::quiz::prompts::{build_quiz_prompt, quiz_system};
use crate::quiz::validation::validate_question_set;

#[derive(Debug, Error)]
pub enum QuizGenerationError {
    #[error("question generation call failed: {0}")]
    Provider(#[from] LlmError),

    #[error("question set is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("question set failed validation: {0}")]
    Invalid(#[from] ValidationError),
}

impl From<QuizGenerationError> for AppError {
    fn from(err: QuizGenerationError) -> Self {
        match err {
            QuizGenerationError::Provider(e) => AppError::Llm(e.to_string()),
            other => AppError::UnprocessableEntity(other.to_string()),
        }
    }
}

/// Generates a screening question set for `job`. Exactly one generation
/// request is issued.
pub async fn generate_questions(
    generator: &dyn TextGenerator,
    job: &JobDetails,
) -> Result<QuestionSet, QuizGenerationError> {
    let prompt = build_quiz_prompt(job);
    let raw = generator.generate(&prompt, &quiz_system()).await?;

    let decoded: Value = serde_json::from_str(strip_json_fences(&raw)).map_err(|e| {
        warn!("Question set is not valid JSON: {e}");
        e
    })?;
    let set = validate_question_set(&decoded).map_err(|e| {
        warn!(field = %e.field, "Question set failed validation: {}", e.reason);
        e
    })?;

    info!(questions = set.mcqs.len(), "Question set generated");
    Ok(set)
}
