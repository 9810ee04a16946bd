use serde::Serialize;

use crate::models::domain::Flashcard;

/// Success payload of `POST /generate`.
///
/// `count` is the number of cards actually returned, which may be fewer
/// than requested when the model comes up short.
#[derive(Debug, Serialize)]
pub struct GenerateFlashcardsResponse {
    pub success: bool,
    pub flashcards: Vec<Flashcard>,
    pub count: usize,
}

impl GenerateFlashcardsResponse {
    pub fn new(flashcards: Vec<Flashcard>) -> Self {
        let count = flashcards.len();
        Self {
            success: true,
            flashcards,
            count,
        }
    }
}
