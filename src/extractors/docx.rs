use docx_rs::DocumentChild;

use crate::errors::{AppError, AppResult};

/// Extracts text from an in-memory DOCX.
///
/// Top-level paragraphs are joined with newlines; text inside tables or
/// headers is not collected.
pub fn extract_text(bytes: &[u8]) -> AppResult<String> {
    let docx = docx_rs::read_docx(bytes)
        .map_err(|err| AppError::ExtractionError(format!("failed to read DOCX: {}", err)))?;

    let paragraphs: Vec<String> = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(paragraph) => Some(paragraph.raw_text()),
            _ => None,
        })
        .collect();

    Ok(paragraphs.join("\n").trim().to_string())
}
