use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    constants::quiz_prompt::render_quiz_prompt,
    errors::AppResult,
    models::domain::QuestionBatch,
    services::payload_decoder::decode_question_batch,
};

/// Per-call inputs for a generation. The seed (32 hex chars) keeps
/// consecutive prompts from being identical, which otherwise yields
/// near-identical quizzes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PromptContext {
    pub seed: String,
    pub requested_at: DateTime<Utc>,
}

impl PromptContext {
    pub fn fresh() -> Self {
        Self {
            seed: Uuid::new_v4().simple().to_string(),
            requested_at: Utc::now(),
        }
    }
}

/// Produces a validated question batch or fails. Implementations may take
/// several seconds.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    async fn generate(&self, context: &PromptContext) -> AppResult<QuestionBatch>;
}

/// Raw text completion: prompt in, unparsed model output out.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, prompt: &str) -> AppResult<String>;
}

/// Adapts a `CompletionBackend` into a `QuestionGenerator` by rendering the
/// quiz prompt and decoding whatever text comes back.
pub struct PromptedQuestionGenerator {
    backend: Arc<dyn CompletionBackend>,
}

impl PromptedQuestionGenerator {
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl QuestionGenerator for PromptedQuestionGenerator {
    async fn generate(&self, context: &PromptContext) -> AppResult<QuestionBatch> {
        let prompt = render_quiz_prompt(context);
        log::debug!("Requesting question batch with seed {}", context.seed);

        let payload = self.backend.complete(&prompt).await?;
        decode_question_batch(&payload)
    }
}

/// Runs one generation with a fresh context, failing with a
/// `GenerationFailure` if it does not finish within `timeout`.
pub async fn bounded_generate(
    generator: &dyn QuestionGenerator,
    timeout: Duration,
) -> AppResult<QuestionBatch> {
    let context = PromptContext::fresh();
    tokio::time::timeout(timeout, generator.generate(&context)).await?
}
