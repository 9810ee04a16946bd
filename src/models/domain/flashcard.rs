use serde::{Deserialize, Serialize};

/// One unit of generated study material: a question/answer pair.
///
/// Flashcards are only ever produced by deserializing model output;
/// the server never constructs them itself. Both fields must be present
/// in the model's JSON for a record to deserialize.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Flashcard {
    pub question: String,
    pub answer: String,
}
