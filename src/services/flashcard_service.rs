use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    extractors,
    models::{
        domain::{Flashcard, UploadedDocument},
        dto::GenerateFlashcardsRequest,
    },
    services::{model_service::TextGenerator, prompt_builder, response_parser},
};

/// Runs one generation cycle: extract uploaded documents, assemble the
/// study material, prompt the model, and parse its reply.
pub struct FlashcardService {
    generator: Arc<dyn TextGenerator>,
}

impl FlashcardService {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    pub async fn generate(
        &self,
        request: GenerateFlashcardsRequest,
        documents: Vec<UploadedDocument>,
    ) -> AppResult<Vec<Flashcard>> {
        let topic = request.topic.trim();
        if topic.is_empty() {
            return Err(AppError::ValidationError("Topic is required".to_string()));
        }

        let mut sections: Vec<String> = Vec::new();
        if let Some(content) = request.content.as_deref() {
            if !content.trim().is_empty() {
                sections.push(content.trim().to_string());
            }
        }
        for document in &documents {
            log::info!("extracting text from '{}'", document.filename);
            let text = extractors::extract_text(document)?;
            if !text.is_empty() {
                sections.push(text);
            }
        }

        let combined = sections.join("\n\n");
        let content = (!combined.is_empty()).then_some(combined.as_str());

        let prompt = prompt_builder::build_prompt(topic, content, request.num_cards);
        log::info!(
            "generating {} flashcards about '{}'",
            request.num_cards,
            topic
        );

        let reply = self.generator.generate(&prompt).await?;
        let flashcards = response_parser::parse_flashcards(&reply, request.num_cards)?;

        log::info!("generated {} flashcards", flashcards.len());
        Ok(flashcards)
    }
}
