#![allow(dead_code)]

use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use async_trait::async_trait;
use tokio::sync::Notify;

use quiz_prefetch_server::{
    config::Config,
    errors::{AppError, AppResult},
    models::domain::{Question, QuestionBatch},
    services::{
        cache_slot::CacheSlot,
        generator::{CompletionBackend, PromptContext, QuestionGenerator},
        prefetch_service::PrefetchController,
        question_service::QuestionService,
    },
};

pub fn batch_with_prefix(prefix: &str) -> QuestionBatch {
    let questions = (0..10)
        .map(|n| {
            Question::new(
                format!("{} question {}", prefix, n),
                ["first", "second", "third", "fourth"],
                (n % 4) as u8,
            )
        })
        .collect::<Vec<_>>();
    QuestionBatch::try_from(questions).expect("ten four-option questions form a batch")
}

pub fn sorted_texts(batch: &QuestionBatch) -> Vec<String> {
    let mut texts: Vec<String> = batch.questions().iter().map(|q| q.text.clone()).collect();
    texts.sort();
    texts
}

pub fn test_config() -> Config {
    Config {
        generator_api_key: None,
        generator_api_base: None,
        generator_model: "gpt-4o".to_string(),
        generator_max_tokens: 2500,
        generation_timeout_secs: 5,
        static_dir: "static".to_string(),
        web_server_host: "127.0.0.1".to_string(),
        web_server_port: 0,
    }
}

pub enum Step {
    Succeed(QuestionBatch),
    Fail,
    /// Waits for the notify before succeeding
    Hold(Arc<Notify>, QuestionBatch),
    /// Waits for the notify before failing
    HoldThenFail(Arc<Notify>),
}

/// Generator that plays back a fixed script of outcomes and counts calls.
/// Once the script runs out every call fails.
pub struct ScriptedGenerator {
    calls: AtomicUsize,
    steps: Mutex<VecDeque<Step>>,
}

impl ScriptedGenerator {
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            steps: Mutex::new(steps.into()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Yields until at least `count` calls have started.
    pub async fn wait_for_calls(&self, count: usize) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while self.calls() < count {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("generator was not called in time");
    }
}

#[async_trait]
impl QuestionGenerator for ScriptedGenerator {
    async fn generate(&self, _context: &PromptContext) -> AppResult<QuestionBatch> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let step = self.steps.lock().unwrap().pop_front();

        match step {
            Some(Step::Succeed(batch)) => Ok(batch),
            Some(Step::Hold(release, batch)) => {
                release.notified().await;
                Ok(batch)
            }
            Some(Step::HoldThenFail(release)) => {
                release.notified().await;
                Err(AppError::GenerationFailure(
                    "scripted generator failure".to_string(),
                ))
            }
            Some(Step::Fail) | None => Err(AppError::GenerationFailure(
                "scripted generator failure".to_string(),
            )),
        }
    }
}

/// Backend that always answers with the same raw text.
pub struct FixedBackend(pub String);

#[async_trait]
impl CompletionBackend for FixedBackend {
    async fn complete(&self, _prompt: &str) -> AppResult<String> {
        Ok(self.0.clone())
    }
}

pub struct Harness {
    pub cache: Arc<CacheSlot>,
    pub prefetch: Arc<PrefetchController>,
    pub service: QuestionService,
    pub generator: Arc<ScriptedGenerator>,
}

impl Harness {
    pub fn new(steps: Vec<Step>) -> Self {
        let generator = Arc::new(ScriptedGenerator::new(steps));
        let timeout = Duration::from_secs(5);
        let cache = Arc::new(CacheSlot::new());
        let prefetch = Arc::new(PrefetchController::new(
            Arc::clone(&cache),
            generator.clone(),
            timeout,
        ));
        let service = QuestionService::new(
            Arc::clone(&cache),
            Arc::clone(&prefetch),
            generator.clone(),
            timeout,
        );

        Self {
            cache,
            prefetch,
            service,
            generator,
        }
    }
}
