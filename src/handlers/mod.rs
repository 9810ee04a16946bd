pub mod generate_handler;
pub mod health_handler;

pub use generate_handler::{generate_from_json, generate_from_upload};
pub use health_handler::api_info;
