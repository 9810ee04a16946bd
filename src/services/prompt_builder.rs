use crate::constants::prompts::{FLASHCARD_FORMAT_EXAMPLE, FLASHCARD_ROLE, FLASHCARD_RULES};

/// Character budget for user-supplied study material, to stay inside the
/// model's context limit. Anything beyond it is dropped.
pub const MAX_CONTENT_CHARS: usize = 15_000;

/// Renders the instruction sent to the model.
///
/// Pure function of (topic, combined content, requested count). Two
/// branches: with study material and topic-only.
pub fn build_prompt(topic: &str, content: Option<&str>, num_cards: usize) -> String {
    match content.filter(|c| !c.trim().is_empty()) {
        Some(content) => {
            let excerpt = truncate_chars(content, MAX_CONTENT_CHARS);
            format!(
                "{role} Generate exactly {num_cards} educational flashcards based on the \
                 following topic and content.\n\n\
                 Topic: {topic}\n\
                 Content: {excerpt}\n\n\
                 Create {num_cards} question-answer pairs that test key concepts from the \
                 content.\n\n\
                 IMPORTANT: You must respond with ONLY a valid JSON array in this exact \
                 format:\n{example}\n\n{rules}\n5. Create exactly {num_cards} flashcards",
                role = FLASHCARD_ROLE,
                example = FLASHCARD_FORMAT_EXAMPLE,
                rules = FLASHCARD_RULES,
            )
        }
        None => format!(
            "{role} Generate exactly {num_cards} educational flashcards about the topic: \
             {topic}\n\n\
             Create {num_cards} question-answer pairs that test key concepts about \
             {topic}.\n\n\
             IMPORTANT: You must respond with ONLY a valid JSON array in this exact \
             format:\n{example}\n\n{rules}\n5. Create exactly {num_cards} flashcards",
            role = FLASHCARD_ROLE,
            example = FLASHCARD_FORMAT_EXAMPLE,
            rules = FLASHCARD_RULES,
        ),
    }
}

/// Truncates to at most `max` characters on a char boundary.
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}
