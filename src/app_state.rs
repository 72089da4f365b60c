use std::sync::Arc;

use crate::{
    config::Config,
    services::{
        cache_slot::CacheSlot,
        generator::{PromptedQuestionGenerator, QuestionGenerator},
        openai_backend::OpenAiBackend,
        prefetch_service::PrefetchController,
        question_service::QuestionService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub question_service: Arc<QuestionService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let backend = Arc::new(OpenAiBackend::from_config(&config));
        let generator = Arc::new(PromptedQuestionGenerator::new(backend));
        Self::with_generator(config, generator)
    }

    /// Builds the state around any generator; tests pass scripted ones.
    pub fn with_generator(config: Config, generator: Arc<dyn QuestionGenerator>) -> Self {
        let timeout = config.generation_timeout();
        let cache = Arc::new(CacheSlot::new());

        let prefetch = Arc::new(PrefetchController::new(
            Arc::clone(&cache),
            Arc::clone(&generator),
            timeout,
        ));
        let question_service = Arc::new(QuestionService::new(cache, prefetch, generator, timeout));

        Self {
            question_service,
            config: Arc::new(config),
        }
    }

    pub fn prefetch(&self) -> &PrefetchController {
        self.question_service.prefetch()
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
    fn test_app_state_starts_with_empty_cache() {
        let state = AppState::new(Config::test_config());

        assert!(!state.question_service.is_cache_populated());
        assert!(!state.prefetch().is_in_flight());
    }
}
