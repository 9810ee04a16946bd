use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    errors::{AppError, AppResult},
    models::domain::Flashcard,
};

// Matches a fenced code block (with optional language tag) wrapping the
// entire payload.
static FENCE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^```[a-zA-Z0-9]*[ \t]*\r?\n?(.*?)\r?\n?```$")
        .expect("FENCE_RE is a valid regex pattern")
});

/// Decodes a model reply into flashcards.
///
/// Models do not reliably honor "return only JSON" instructions, so the
/// input is cleaned up before decoding: whitespace trimmed, a wrapping
/// code fence stripped, and the array located by greedy bracket match so
/// surrounding commentary is ignored. The decoded structure itself is
/// held to the strict contract: a JSON array, truncated to `num_cards`,
/// in which every remaining element must carry both `question` and
/// `answer`. One bad record fails the whole batch.
pub fn parse_flashcards(raw: &str, num_cards: usize) -> AppResult<Vec<Flashcard>> {
    let trimmed = raw.trim();

    let unfenced = match FENCE_RE.captures(trimmed) {
        Some(captures) => captures
            .get(1)
            .map(|payload| payload.as_str())
            .unwrap_or(trimmed),
        None => trimmed,
    };

    let start = unfenced
        .find('[')
        .ok_or_else(|| AppError::ParseError("no JSON array found in model output".to_string()))?;
    let end = unfenced
        .rfind(']')
        .filter(|&end| end > start)
        .ok_or_else(|| AppError::ParseError("no JSON array found in model output".to_string()))?;
    let payload = &unfenced[start..=end];

    let records: Vec<serde_json::Value> = serde_json::from_str(payload).map_err(|err| {
        AppError::ParseError(format!("model output is not a valid JSON array: {}", err))
    })?;

    records
        .into_iter()
        .take(num_cards)
        .map(|record| {
            serde_json::from_value(record).map_err(|err| {
                AppError::ParseError(format!("invalid flashcard in model output: {}", err))
            })
        })
        .collect()
}
