use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::{
    config::Config,
    errors::{AppError, AppResult},
};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Seam between the generation flow and the text-generation provider.
///
/// Provider failures (network, auth, quota) are opaque to the caller and
/// surface uniformly as `GenerationError`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Sends a prompt and returns the raw text completion.
    async fn generate(&self, prompt: &str) -> AppResult<String>;
}

/// Gemini `generateContent` client over plain REST.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: SecretString,
    model: String,
}

impl GeminiClient {
    /// Builds a client from configuration.
    ///
    /// Fails with `ServiceUnavailable` when no API key is configured, so
    /// the caller can keep serving and answer 503 on generation routes.
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let api_key = config.gemini_api_key.clone().ok_or_else(|| {
            AppError::ServiceUnavailable("GEMINI_API_KEY is not configured".to_string())
        })?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.model_timeout_secs))
            .build()
            .map_err(|err| {
                AppError::InternalError(format!("failed to build HTTP client: {}", err))
            })?;

        Ok(Self {
            http,
            api_key,
            model: config.gemini_model.clone(),
        })
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> AppResult<String> {
        let url = format!("{}/models/{}:generateContent", GEMINI_API_BASE, self.model);
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|err| AppError::GenerationError(format!("model API call failed: {}", err)))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(AppError::GenerationError(format!(
                "model API returned {}: {}",
                status, detail
            )));
        }

        let reply: GenerateContentResponse = response.json().await.map_err(|err| {
            AppError::GenerationError(format!("failed to decode model API response: {}", err))
        })?;

        let text = reply
            .candidates
            .into_iter()
            .next()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .into_iter()
                    .map(|part| part.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(AppError::GenerationError(
                "model returned an empty completion".to_string(),
            ));
        }

        Ok(text)
    }
}

// Wire types for the `generateContent` endpoint. Kept private; nothing
// outside this module speaks the provider's format.

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}
