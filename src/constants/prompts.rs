//! Prompt fragments shared by both generation branches.
//!
//! The model is instructed to answer with a bare JSON array; that is a
//! best-effort instruction, and the response parser stays tolerant of
//! violations (fences, surrounding prose).

pub const FLASHCARD_ROLE: &str = "You are an expert educator.";

pub const FLASHCARD_FORMAT_EXAMPLE: &str = r#"[
    {"question": "What is the main concept of X?", "answer": "The main concept is Y"},
    {"question": "How does Z work?", "answer": "Z works by doing A"}
]"#;

pub const FLASHCARD_RULES: &str = "Rules:
1. Return ONLY the JSON array, nothing else
2. No markdown formatting, no code blocks, no explanations
3. Questions should be clear and specific
4. Answers should be concise but complete";
