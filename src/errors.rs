use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Extraction error: {0}")]
    ExtractionError(String),

    #[error("Generation error: {0}")]
    GenerationError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::ExtractionError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::GenerationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ParseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Internal causes are logged here and never leak to the client.
        // Parse failures carry their decode diagnostic in `details`.
        let body = match self {
            AppError::ParseError(detail) => {
                log::error!("{}", self);
                ErrorResponse {
                    error: "Failed to parse the model response. Please try again.".to_string(),
                    details: Some(detail.clone()),
                }
            }
            AppError::ExtractionError(_)
            | AppError::GenerationError(_)
            | AppError::InternalError(_) => {
                log::error!("{}", self);
                ErrorResponse {
                    error: "An error occurred while generating flashcards.".to_string(),
                    details: None,
                }
            }
            AppError::ValidationError(message) => ErrorResponse {
                error: message.clone(),
                details: None,
            },
            AppError::ServiceUnavailable(message) => ErrorResponse {
                error: message.clone(),
                details: None,
            },
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
