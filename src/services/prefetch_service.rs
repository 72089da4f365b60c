use std::{
    sync::{
        atomic::{AtomicBool, AtomicU64, Ordering},
        Arc, Mutex, PoisonError,
    },
    time::Duration,
};

use serde::Serialize;
use tokio::task::JoinHandle;

use crate::services::{
    cache_slot::CacheSlot,
    generator::{bounded_generate, QuestionGenerator},
};

/// Ownership of the process-wide refill flag. At most one guard exists at a
/// time; dropping it clears the flag, so the flag is released on every exit
/// path of the task holding it, including panic and abort.
#[derive(Debug)]
pub struct FlightGuard {
    flag: Arc<AtomicBool>,
}

impl FlightGuard {
    pub fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self {
                flag: Arc::clone(flag),
            })
    }
}

impl Drop for FlightGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[derive(Debug, Default)]
pub struct RefillStats {
    attempts: AtomicU64,
    successes: AtomicU64,
    failures: AtomicU64,
    absorbed: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RefillStatsSnapshot {
    pub attempts: u64,
    pub successes: u64,
    pub failures: u64,
    pub absorbed: u64,
}

impl RefillStats {
    pub fn snapshot(&self) -> RefillStatsSnapshot {
        RefillStatsSnapshot {
            attempts: self.attempts.load(Ordering::Relaxed),
            successes: self.successes.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
            absorbed: self.absorbed.load(Ordering::Relaxed),
        }
    }
}

/// Background regeneration of the question cache with at most one
/// generation in flight process-wide.
pub struct PrefetchController {
    cache: Arc<CacheSlot>,
    generator: Arc<dyn QuestionGenerator>,
    timeout: Duration,
    in_flight: Arc<AtomicBool>,
    stats: Arc<RefillStats>,
    worker_handle: Mutex<Option<JoinHandle<()>>>,
}

impl PrefetchController {
    pub fn new(
        cache: Arc<CacheSlot>,
        generator: Arc<dyn QuestionGenerator>,
        timeout: Duration,
    ) -> Self {
        Self {
            cache,
            generator,
            timeout,
            in_flight: Arc::new(AtomicBool::new(false)),
            stats: Arc::new(RefillStats::default()),
            worker_handle: Mutex::new(None),
        }
    }

    /// Starts a background refill unless one is already running.
    /// Never waits; returns whether a new refill was started.
    /// Must be called from within a Tokio runtime.
    pub fn try_start_refill(&self) -> bool {
        // Held until the new handle is stored, so a refill finishing and a
        // new one starting cannot leave a stale handle in the slot.
        let mut worker_handle = self
            .worker_handle
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let Some(guard) = FlightGuard::acquire(&self.in_flight) else {
            self.stats.absorbed.fetch_add(1, Ordering::Relaxed);
            log::debug!("Refill already in flight, trigger absorbed");
            return false;
        };

        self.stats.attempts.fetch_add(1, Ordering::Relaxed);

        let cache = Arc::clone(&self.cache);
        let generator = Arc::clone(&self.generator);
        let stats = Arc::clone(&self.stats);
        let timeout = self.timeout;

        *worker_handle = Some(tokio::spawn(async move {
            let _guard = guard;

            match bounded_generate(generator.as_ref(), timeout).await {
                Ok(batch) => {
                    cache.set(batch);
                    stats.successes.fetch_add(1, Ordering::Relaxed);
                    log::info!("Question cache refreshed");
                }
                Err(e) => {
                    stats.failures.fetch_add(1, Ordering::Relaxed);
                    log::warn!("Background refill failed, keeping previous batch: {}", e);
                }
            }
        }));

        true
    }

    /// Fills the cache once at startup. Goes through the same single-flight
    /// check, so a request racing the startup fill collapses into it.
    pub fn run_initial_fill(&self) -> bool {
        log::info!("Starting initial question cache fill");
        self.try_start_refill()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn stats(&self) -> RefillStatsSnapshot {
        self.stats.snapshot()
    }

    /// Waits for the most recently started refill, if any, to finish.
    pub async fn join_in_flight(&self) {
        let handle = self
            .worker_handle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                if e.is_panic() {
                    log::error!("Background refill task panicked: {}", e);
                }
            }
        }
    }

    /// Aborts a running refill. The flag is released when the task drops.
    pub fn shutdown(&self) {
        if let Some(handle) = self
            .worker_handle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            handle.abort();
        }
    }
}
