pub mod request;
pub mod response;
pub use request::GenerateFlashcardsRequest;
pub use response::GenerateFlashcardsResponse;
