use std::sync::Arc;

use actix_web::{http::StatusCode, test, web, App};
use async_trait::async_trait;

use flashdeck_server::{
    app_state::AppState,
    config::Config,
    errors::{AppError, AppResult},
    handlers,
    services::model_service::TextGenerator,
};

const WELL_FORMED_REPLY: &str = r#"[
    {"question": "What is photosynthesis?", "answer": "Conversion of light into chemical energy"},
    {"question": "Where does it occur?", "answer": "In the chloroplasts"}
]"#;

/// Always answers with the same canned completion.
struct CannedGenerator(String);

#[async_trait]
impl TextGenerator for CannedGenerator {
    async fn generate(&self, _prompt: &str) -> AppResult<String> {
        Ok(self.0.clone())
    }
}

/// Fails the test if the model is reached at all.
struct UnreachableGenerator;

#[async_trait]
impl TextGenerator for UnreachableGenerator {
    async fn generate(&self, _prompt: &str) -> AppResult<String> {
        Err(AppError::InternalError(
            "the model should not have been called".to_string(),
        ))
    }
}

fn state_with_reply(reply: &str) -> AppState {
    AppState::with_generator(
        Config::from_env(),
        Arc::new(CannedGenerator(reply.to_string())),
    )
}

macro_rules! test_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .service(handlers::api_info)
                .service(handlers::generate_from_upload)
                .service(handlers::generate_from_json),
        )
        .await
    };
}

fn multipart_payload(parts: &[(&str, Option<&str>, &[u8])]) -> (String, Vec<u8>) {
    let boundary = "----flashdeck-test-boundary";
    let mut body: Vec<u8> = Vec::new();
    for (name, filename, value) in parts {
        body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
        match filename {
            Some(filename) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
                     Content-Type: application/octet-stream\r\n\r\n",
                    name, filename
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
            ),
        }
        body.extend_from_slice(value);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", boundary).as_bytes());
    (
        format!("multipart/form-data; boundary={}", boundary),
        body,
    )
}

#[actix_web::test]
async fn test_generate_json_returns_requested_count() {
    let app = test_app!(state_with_reply(WELL_FORMED_REPLY));

    let request = test::TestRequest::post()
        .uri("/generate")
        .set_json(serde_json::json!({"topic": "Photosynthesis", "num_cards": 2}))
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 2);
    assert_eq!(body["flashcards"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["flashcards"][0]["question"], "What is photosynthesis?");
}

#[actix_web::test]
async fn test_generate_handles_fenced_model_output() {
    let fenced = format!("```json\n{}\n```", WELL_FORMED_REPLY);
    let app = test_app!(state_with_reply(&fenced));

    let request = test::TestRequest::post()
        .uri("/generate")
        .set_json(serde_json::json!({"topic": "Photosynthesis", "num_cards": 2}))
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(body["count"], 2);
}

#[actix_web::test]
async fn test_generate_rejects_empty_topic() {
    let app = test_app!(state_with_reply(WELL_FORMED_REPLY));

    let request = test::TestRequest::post()
        .uri("/generate")
        .set_json(serde_json::json!({"topic": "", "num_cards": 2}))
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_generate_rejects_zero_cards() {
    let app = test_app!(state_with_reply(WELL_FORMED_REPLY));

    let request = test::TestRequest::post()
        .uri("/generate")
        .set_json(serde_json::json!({"topic": "Photosynthesis", "num_cards": 0}))
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_generate_without_credential_is_503() {
    let mut config = Config::from_env();
    config.gemini_api_key = None;
    let app = test_app!(AppState::new(config));

    let request = test::TestRequest::post()
        .uri("/generate")
        .set_json(serde_json::json!({"topic": "Photosynthesis", "num_cards": 2}))
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[actix_web::test]
async fn test_generate_prose_reply_is_500_with_error_body() {
    let app = test_app!(state_with_reply(
        "I cannot produce flashcards for that topic."
    ));

    let request = test::TestRequest::post()
        .uri("/generate")
        .set_json(serde_json::json!({"topic": "Photosynthesis", "num_cards": 2}))
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = test::read_body_json(response).await;
    assert!(body["error"].is_string());
    assert!(body["details"].is_string());
}

#[actix_web::test]
async fn test_generate_incomplete_record_fails_whole_batch() {
    let partial = r#"[
        {"question": "Complete card", "answer": "Yes"},
        {"question": "No answer here"}
    ]"#;
    let app = test_app!(state_with_reply(partial));

    let request = test::TestRequest::post()
        .uri("/generate")
        .set_json(serde_json::json!({"topic": "Photosynthesis", "num_cards": 5}))
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[actix_web::test]
async fn test_multipart_without_files_generates() {
    let app = test_app!(state_with_reply(WELL_FORMED_REPLY));

    let (content_type, body) = multipart_payload(&[
        ("topic", None, b"Photosynthesis"),
        ("num_cards", None, b"2"),
    ]);
    let request = test::TestRequest::post()
        .uri("/generate")
        .insert_header(("content-type", content_type))
        .set_payload(body)
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(body["count"], 2);
}

#[actix_web::test]
async fn test_multipart_three_files_rejected_before_model_call() {
    let app = test_app!(AppState::with_generator(
        Config::from_env(),
        Arc::new(UnreachableGenerator),
    ));

    let (content_type, body) = multipart_payload(&[
        ("topic", None, b"Photosynthesis"),
        ("files", Some("a.pdf"), b"%PDF-1.4 stub"),
        ("files", Some("b.pdf"), b"%PDF-1.4 stub"),
        ("files", Some("c.pdf"), b"%PDF-1.4 stub"),
    ]);
    let request = test::TestRequest::post()
        .uri("/generate")
        .insert_header(("content-type", content_type))
        .set_payload(body)
        .to_request();
    let response = test::call_service(&app, request).await;

    // 400, not 500: the third file is refused before extraction or any
    // model traffic.
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_multipart_txt_file_rejected_with_filename() {
    let app = test_app!(AppState::with_generator(
        Config::from_env(),
        Arc::new(UnreachableGenerator),
    ));

    let (content_type, body) = multipart_payload(&[
        ("topic", None, b"Photosynthesis"),
        ("files", Some("notes.txt"), b"plain text notes"),
    ]);
    let request = test::TestRequest::post()
        .uri("/generate")
        .insert_header(("content-type", content_type))
        .set_payload(body)
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error should be a string")
        .contains("notes.txt"));
}

#[actix_web::test]
async fn test_multipart_unreadable_pdf_is_500() {
    let app = test_app!(AppState::with_generator(
        Config::from_env(),
        Arc::new(UnreachableGenerator),
    ));

    let (content_type, body) = multipart_payload(&[
        ("topic", None, b"Photosynthesis"),
        ("files", Some("broken.pdf"), b"definitely not a pdf"),
    ]);
    let request = test::TestRequest::post()
        .uri("/generate")
        .insert_header(("content-type", content_type))
        .set_payload(body)
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = test::read_body_json(response).await;
    // Generic message only; the extraction cause stays in the logs.
    assert!(body["details"].is_null());
}

#[actix_web::test]
async fn test_api_info_reports_configured_model() {
    let app = test_app!(state_with_reply(WELL_FORMED_REPLY));

    let request = test::TestRequest::get().uri("/").to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["model"], "gemini-1.5-flash");
}

#[actix_web::test]
async fn test_api_info_model_is_null_without_credential() {
    let mut config = Config::from_env();
    config.gemini_api_key = None;
    let app = test_app!(AppState::new(config));

    let request = test::TestRequest::get().uri("/").to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(response).await;
    assert!(body["model"].is_null());
}
