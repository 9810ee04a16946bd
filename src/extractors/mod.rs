//! Document-to-text extraction, dispatched on the declared file format.
//!
//! Parsing delegates entirely to format libraries; there is no OCR,
//! layout awareness, or image handling. Output is trimmed plain text.

mod docx;
mod pdf;

use crate::{
    errors::AppResult,
    models::domain::{DocumentKind, UploadedDocument},
};

/// Converts an uploaded document into plain text.
pub fn extract_text(document: &UploadedDocument) -> AppResult<String> {
    match document.kind {
        DocumentKind::Pdf => pdf::extract_text(&document.bytes),
        DocumentKind::Docx => docx::extract_text(&document.bytes),
    }
}
