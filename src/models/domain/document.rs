/// Document formats the extractor understands, selected by file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    /// Maps a declared filename to a supported format.
    ///
    /// Returns `None` for missing or unsupported extensions; the caller
    /// turns that into a client error naming the offending file.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let extension = filename.rsplit_once('.').map(|(_, ext)| ext)?;
        match extension.to_lowercase().as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "docx" => Some(DocumentKind::Docx),
            _ => None,
        }
    }
}

/// An uploaded document, held in memory for the duration of one request.
#[derive(Clone, Debug)]
pub struct UploadedDocument {
    pub filename: String,
    pub kind: DocumentKind,
    pub bytes: Vec<u8>,
}
