use anyhow::Result;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::analysis::models::JobDetails;
use crate::models::quiz::{QuestionSetRow, QuizAttemptRow};
use crate::quiz::grading::QuizResults;
use crate::quiz::models::QuestionSet;

pub async fn insert_question_set(
    pool: &PgPool,
    user_id: Uuid,
    job: &JobDetails,
    set: &QuestionSet,
) -> Result<QuestionSetRow> {
    let row = sqlx::query_as::<_, QuestionSetRow>(
        r#"
        INSERT INTO question_sets (id, user_id, job_title, job_description, questions)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(job.job_title.as_deref())
    .bind(&job.job_description)
    .bind(serde_json::to_value(set)?)
    .fetch_one(pool)
    .await?;

    info!(
        "Stored question set {} ({} questions) for user {}",
        row.id,
        set.mcqs.len(),
        row.user_id
    );
    Ok(row)
}

pub async fn get_question_set(pool: &PgPool, id: Uuid) -> Result<Option<QuestionSetRow>> {
    let row = sqlx::query_as::<_, QuestionSetRow>("SELECT * FROM question_sets WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn insert_attempt(
    pool: &PgPool,
    question_set_id: Uuid,
    user_id: Uuid,
    results: &QuizResults,
) -> Result<QuizAttemptRow> {
    let row = sqlx::query_as::<_, QuizAttemptRow>(
        r#"
        INSERT INTO quiz_attempts (id, question_set_id, user_id, results, score)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(question_set_id)
    .bind(user_id)
    .bind(serde_json::to_value(results)?)
    .bind(results.score as i32)
    .fetch_one(pool)
    .await?;

    info!(
        "Stored attempt {} on question set {} (score {}%)",
        row.id, question_set_id, results.score
    );
    Ok(row)
}

pub async fn get_attempt(pool: &PgPool, id: Uuid) -> Result<Option<QuizAttemptRow>> {
    let row = sqlx::query_as::<_, QuizAttemptRow>("SELECT * FROM quiz_attempts WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

impl QuestionSetRow {
    pub fn question_set(&self) -> Result<QuestionSet> {
        Ok(serde_json::from_value(self.questions.clone())?)
    }
}

impl QuizAttemptRow {
    pub fn quiz_results(&self) -> Result<QuizResults> {
        Ok(serde_json::from_value(self.results.clone())?)
    }
}
