//! Axum route handlers for the Resume API.

use axum::{extract::Multipart, Json};
use bytes::Bytes;
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::resume::extract::extract_pdf_text;

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub text: String,
    pub char_count: usize,
}

/// POST /api/v1/resumes/extract
///
/// Accepts a multipart `file` field holding a PDF and returns its text.
pub async fn handle_extract_resume(mut multipart: Multipart) -> Result<Json<ExtractResponse>, AppError> {
    let mut file: Option<Bytes> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read file data: {e}")))?;
            file = Some(data);
        }
    }

    let data = file.ok_or_else(|| AppError::Validation("No file provided".to_string()))?;
    let size = data.len();
    let text = tokio::task::spawn_blocking(move || extract_pdf_text(&data))
        .await
        .map_err(|e| AppError::Internal(e.into()))??;

    let char_count = text.chars().count();
    info!(bytes = size, char_count, "Extracted résumé text from PDF");
    Ok(Json(ExtractResponse { text, char_count }))
}
