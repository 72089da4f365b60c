use std::{
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use futures::future::{BoxFuture, FutureExt, Shared};

use crate::{
    errors::{AppError, AppResult},
    models::domain::QuestionBatch,
    services::{
        cache_slot::CacheSlot,
        generator::{bounded_generate, QuestionGenerator},
        prefetch_service::PrefetchController,
        shuffler,
    },
};

type ColdStart = Shared<BoxFuture<'static, AppResult<QuestionBatch>>>;

/// Serves question batches to requests: from the cache when it holds a
/// batch, otherwise by generating one on the request path.
///
/// Requests that find the cache empty at the same time all await one shared
/// generation, so a burst of cold requests costs a single generator call.
pub struct QuestionService {
    cache: Arc<CacheSlot>,
    prefetch: Arc<PrefetchController>,
    generator: Arc<dyn QuestionGenerator>,
    timeout: Duration,
    cold_start: Arc<Mutex<Option<ColdStart>>>,
}

impl QuestionService {
    pub fn new(
        cache: Arc<CacheSlot>,
        prefetch: Arc<PrefetchController>,
        generator: Arc<dyn QuestionGenerator>,
        timeout: Duration,
    ) -> Self {
        Self {
            cache,
            prefetch,
            generator,
            timeout,
            cold_start: Arc::new(Mutex::new(None)),
        }
    }

    pub async fn serve(&self) -> AppResult<QuestionBatch> {
        if let Some(cached) = self.cache.get() {
            return Ok(self.serve_cached(&cached));
        }

        let flight = {
            let mut slot = self
                .cold_start
                .lock()
                .unwrap_or_else(PoisonError::into_inner);

            // A cold start may have landed between the first check and the lock.
            if let Some(cached) = self.cache.get() {
                drop(slot);
                return Ok(self.serve_cached(&cached));
            }

            match slot.as_ref() {
                Some(flight) => {
                    log::debug!("Joining cold start already in progress");
                    flight.clone()
                }
                None => {
                    let flight = self.start_cold_generation();
                    *slot = Some(flight.clone());
                    flight
                }
            }
        };

        flight.await
    }

    fn serve_cached(&self, cached: &QuestionBatch) -> QuestionBatch {
        let shuffled = shuffler::shuffle(cached);
        self.prefetch.try_start_refill();
        shuffled
    }

    // Freshly generated batches are returned in generation order. The
    // generation stores its result before clearing the slot, so the cache
    // re-check in `serve` never misses a finished cold start.
    fn start_cold_generation(&self) -> ColdStart {
        log::info!("Question cache empty, generating on request path");

        let cache = Arc::clone(&self.cache);
        let generator = Arc::clone(&self.generator);
        let slot = Arc::clone(&self.cold_start);
        let timeout = self.timeout;

        async move {
            let result = match bounded_generate(generator.as_ref(), timeout).await {
                Ok(batch) => {
                    cache.set(batch.clone());
                    Ok(batch)
                }
                Err(e) => {
                    log::warn!("Cold start generation failed: {}", e);
                    Err(AppError::ColdStartFailure(e.to_string()))
                }
            };

            *slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
            result
        }
        .boxed()
        .shared()
    }

    pub fn prefetch(&self) -> &PrefetchController {
        &self.prefetch
    }

    pub fn is_cache_populated(&self) -> bool {
        self.cache.is_populated()
    }
}
