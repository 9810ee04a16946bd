use actix_web::{get, web, HttpResponse};

use crate::app_state::AppState;

/// Root info route; `model` is null until a credential is configured.
#[get("/")]
pub async fn api_info(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Flashcard generator API is running",
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "model": state.configured_model(),
        "endpoints": {
            "/generate": "POST - Generate flashcards"
        }
    }))
}
