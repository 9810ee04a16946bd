use std::sync::Arc;

use crate::{
    config::Config,
    services::{
        flashcard_service::FlashcardService,
        model_service::{GeminiClient, TextGenerator},
    },
};

/// Shared per-worker state.
///
/// `flashcard_service` is `None` when the model client could not be
/// built (missing credential); generation routes answer 503 in that
/// case while the rest of the API keeps serving.
#[derive(Clone)]
pub struct AppState {
    pub flashcard_service: Option<Arc<FlashcardService>>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let flashcard_service = match GeminiClient::from_config(&config) {
            Ok(client) => Some(Arc::new(FlashcardService::new(Arc::new(client)))),
            Err(err) => {
                log::warn!("model client unavailable, /generate will answer 503: {}", err);
                None
            }
        };

        Self {
            flashcard_service,
            config: Arc::new(config),
        }
    }

    /// Builds state around an injected generator, bypassing the Gemini
    /// client. Used by tests to stub the provider.
    pub fn with_generator(config: Config, generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            flashcard_service: Some(Arc::new(FlashcardService::new(generator))),
            config: Arc::new(config),
        }
    }

    /// Model identifier to report on the info route, present only when
    /// the client is configured.
    pub fn configured_model(&self) -> Option<&str> {
        self.flashcard_service
            .as_ref()
            .map(|_| self.config.gemini_model.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_cloneable() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_state_without_credential_has_no_service() {
        let mut config = Config::test_config();
        config.gemini_api_key = None;

        let state = AppState::new(config);
        assert!(state.flashcard_service.is_none());
        assert!(state.configured_model().is_none());
    }

    #[test]
    fn test_state_with_credential_reports_model() {
        let state = AppState::new(Config::test_config());
        assert!(state.flashcard_service.is_some());
        assert_eq!(state.configured_model(), Some("gemini-1.5-flash"));
    }
}
