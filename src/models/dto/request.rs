use serde::Deserialize;
use validator::Validate;

pub const DEFAULT_NUM_CARDS: usize = 5;

/// Body of `POST /generate`.
///
/// Arrives either as JSON or assembled from multipart form fields; the
/// uploaded documents travel separately as `UploadedDocument` values.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenerateFlashcardsRequest {
    #[validate(length(min = 1, message = "Topic is required"))]
    pub topic: String,

    #[serde(default)]
    pub content: Option<String>,

    #[validate(range(min = 1, message = "num_cards must be a positive integer"))]
    #[serde(default = "default_num_cards")]
    pub num_cards: usize,
}

fn default_num_cards() -> usize {
    DEFAULT_NUM_CARDS
}
