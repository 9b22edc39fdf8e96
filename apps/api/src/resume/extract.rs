//! PDF résumé text extraction. Uploads are processed in memory and never stored.

use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

use crate::errors::AppError;

/// Maximum accepted upload size.
pub const MAX_PDF_BYTES: usize = 10 * 1024 * 1024;

const PDF_MAGIC: &[u8] = b"%PDF-";

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("uploaded file is empty")]
    Empty,

    #[error("uploaded file is not a PDF")]
    NotPdf,

    #[error("uploaded file exceeds {MAX_PDF_BYTES} bytes")]
    TooLarge,

    #[error("could not read PDF: {0}")]
    Parse(String),

    #[error("PDF contains no extractable text")]
    NoText,
}

impl From<ExtractError> for AppError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::Parse(_) | ExtractError::NoText => {
                AppError::UnprocessableEntity(err.to_string())
            }
            _ => AppError::Validation(err.to_string()),
        }
    }
}

pub fn is_pdf(data: &[u8]) -> bool {
    data.starts_with(PDF_MAGIC)
}

/// Extracts the text layer of a PDF and normalizes it.
pub fn extract_pdf_text(data: &Bytes) -> Result<String, ExtractError> {
    if data.is_empty() {
        return Err(ExtractError::Empty);
    }
    if data.len() > MAX_PDF_BYTES {
        return Err(ExtractError::TooLarge);
    }
    if !is_pdf(data) {
        return Err(ExtractError::NotPdf);
    }

    let raw = pdf_extract::extract_text_from_mem(data)
        .map_err(|e| ExtractError::Parse(e.to_string()))?;
    debug!(raw_chars = raw.len(), "Extracted PDF text layer");

    let text = normalize_text(&raw);
    if text.is_empty() {
        return Err(ExtractError::NoText);
    }
    Ok(text)
}

/// Trims every line and drops the blank ones.
pub fn normalize_text(raw: &str) -> String {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_and_drops_blank_lines() {
        let raw = "  Jane Doe  \n\n\t Frontend Engineer\n   \nReact, TypeScript  \n";
        assert_eq!(
            normalize_text(raw),
            "Jane Doe\nFrontend Engineer\nReact, TypeScript"
        );
    }

    #[test]
    fn test_normalize_whitespace_only() {
        assert_eq!(normalize_text(" \n\t\n "), "");
    }

    #[test]
    fn test_empty_upload_rejected() {
        assert!(matches!(
            extract_pdf_text(&Bytes::new()),
            Err(ExtractError::Empty)
        ));
    }

    #[test]
    fn test_non_pdf_rejected() {
        let data = Bytes::from_static(b"PK\x03\x04 this is a docx");
        assert!(matches!(extract_pdf_text(&data), Err(ExtractError::NotPdf)));
    }

    #[test]
    fn test_oversized_upload_rejected() {
        let mut data = PDF_MAGIC.to_vec();
        data.resize(MAX_PDF_BYTES + 1, b' ');
        assert!(matches!(
            extract_pdf_text(&Bytes::from(data)),
            Err(ExtractError::TooLarge)
        ));
    }

    #[test]
    fn test_corrupt_pdf_is_parse_error() {
        let data = Bytes::from_static(b"%PDF-1.4\nnot really a pdf");
        assert!(matches!(extract_pdf_text(&data), Err(ExtractError::Parse(_))));
    }

    #[test]
    fn test_error_mapping() {
        assert!(matches!(AppError::from(ExtractError::NotPdf), AppError::Validation(_)));
        assert!(matches!(
            AppError::from(ExtractError::NoText),
            AppError::UnprocessableEntity(_)
        ));
    }
}
