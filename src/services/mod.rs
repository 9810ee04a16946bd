pub mod flashcard_service;
pub mod model_service;
pub mod prompt_builder;
pub mod response_parser;
