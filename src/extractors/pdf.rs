use crate::errors::{AppError, AppResult};

/// Extracts text from an in-memory PDF.
///
/// `pdf-extract` concatenates per-page text with newlines. Corrupted or
/// encrypted documents come back as an extraction error.
pub fn extract_text(bytes: &[u8]) -> AppResult<String> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|err| AppError::ExtractionError(format!("failed to read PDF: {}", err)))?;
    Ok(text.trim().to_string())
}
