use actix_multipart::{Field, Multipart};
use actix_web::{guard::GuardContext, http::header, post, web, HttpResponse};
use futures::{StreamExt, TryStreamExt};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::{
        domain::{DocumentKind, UploadedDocument},
        dto::{request::DEFAULT_NUM_CARDS, GenerateFlashcardsRequest, GenerateFlashcardsResponse},
    },
};

pub const MAX_DOCUMENTS: usize = 2;
pub const MAX_DOCUMENT_BYTES: usize = 10 * 1024 * 1024;

// Text form fields never legitimately approach this size; the cap bounds
// memory for hostile payloads.
const MAX_TEXT_FIELD_BYTES: usize = 1024 * 1024;

/// Routes multipart submissions to the upload handler; everything else
/// falls through to the JSON handler on the same path.
fn is_multipart(ctx: &GuardContext) -> bool {
    ctx.head()
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| {
            value
                .trim_start()
                .to_ascii_lowercase()
                .starts_with("multipart/form-data")
        })
        .unwrap_or(false)
}

#[post("/generate", guard = "is_multipart")]
pub async fn generate_from_upload(
    state: web::Data<AppState>,
    payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let (request, documents) = collect_multipart(payload).await?;
    run_generation(&state, request, documents).await
}

#[post("/generate")]
pub async fn generate_from_json(
    state: web::Data<AppState>,
    request: web::Json<GenerateFlashcardsRequest>,
) -> Result<HttpResponse, AppError> {
    run_generation(&state, request.into_inner(), Vec::new()).await
}

async fn run_generation(
    state: &AppState,
    request: GenerateFlashcardsRequest,
    documents: Vec<UploadedDocument>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;

    let service = state.flashcard_service.as_ref().ok_or_else(|| {
        AppError::ServiceUnavailable(
            "The text generation model is not configured. Please try again later.".to_string(),
        )
    })?;

    let flashcards = service.generate(request, documents).await?;
    Ok(HttpResponse::Ok().json(GenerateFlashcardsResponse::new(flashcards)))
}

/// Drains a multipart payload into the request DTO plus uploaded
/// documents.
///
/// Any field carrying a filename counts as a document upload, so both
/// `files` and `files[]` field names work. The file count, extension,
/// and size limits are all enforced here, before any extraction runs; a
/// third file is rejected before its bytes are read.
async fn collect_multipart(
    mut payload: Multipart,
) -> Result<(GenerateFlashcardsRequest, Vec<UploadedDocument>), AppError> {
    let mut topic = String::new();
    let mut content: Option<String> = None;
    let mut num_cards = DEFAULT_NUM_CARDS;
    let mut documents: Vec<UploadedDocument> = Vec::new();

    while let Some(mut field) = payload.try_next().await.map_err(multipart_error)? {
        let filename = field
            .content_disposition()
            .get_filename()
            .map(str::to_string);

        match filename {
            Some(filename) => {
                if documents.len() == MAX_DOCUMENTS {
                    return Err(AppError::ValidationError(format!(
                        "Too many files: at most {} documents are allowed",
                        MAX_DOCUMENTS
                    )));
                }
                let kind = DocumentKind::from_filename(&filename).ok_or_else(|| {
                    AppError::ValidationError(format!(
                        "Unsupported file type for '{}': only .pdf and .docx are accepted",
                        filename
                    ))
                })?;
                let bytes = read_field_bytes(
                    &mut field,
                    MAX_DOCUMENT_BYTES,
                    &format!("File '{}'", filename),
                )
                .await?;
                documents.push(UploadedDocument {
                    filename,
                    kind,
                    bytes,
                });
            }
            None => {
                let name = field.name().to_string();
                let bytes =
                    read_field_bytes(&mut field, MAX_TEXT_FIELD_BYTES, &format!("Field '{}'", name))
                        .await?;
                let value = String::from_utf8(bytes).map_err(|_| {
                    AppError::ValidationError(format!("Field '{}' is not valid UTF-8", name))
                })?;

                match name.as_str() {
                    "topic" => topic = value,
                    "content" => content = Some(value),
                    "num_cards" => {
                        num_cards = value.trim().parse().map_err(|_| {
                            AppError::ValidationError(
                                "num_cards must be a positive integer".to_string(),
                            )
                        })?;
                    }
                    _ => {}
                }
            }
        }
    }

    let request = GenerateFlashcardsRequest {
        topic,
        content,
        num_cards,
    };
    Ok((request, documents))
}

async fn read_field_bytes(
    field: &mut Field,
    limit: usize,
    what: &str,
) -> Result<Vec<u8>, AppError> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(multipart_error)?;
        if bytes.len() + chunk.len() > limit {
            return Err(AppError::ValidationError(format!(
                "{} exceeds the {} byte size limit",
                what, limit
            )));
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

fn multipart_error(err: actix_multipart::MultipartError) -> AppError {
    AppError::ValidationError(format!("Malformed multipart payload: {}", err))
}
