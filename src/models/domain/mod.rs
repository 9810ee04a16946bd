pub mod document;
pub mod flashcard;
pub use document::{DocumentKind, UploadedDocument};
pub use flashcard::Flashcard;
