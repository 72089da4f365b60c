use std::sync::{Arc, PoisonError, RwLock};

use crate::models::domain::QuestionBatch;

/// Holds the most recent successfully generated batch.
///
/// The lock only ever guards an `Option<Arc<_>>` swap or clone, so readers and
/// the writer hold it for a pointer copy and nothing else. A reader keeps its
/// `Arc` after the lock is released and is unaffected by later `set` calls.
#[derive(Default)]
pub struct CacheSlot {
    current: RwLock<Option<Arc<QuestionBatch>>>,
}

impl CacheSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<Arc<QuestionBatch>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set(&self, batch: QuestionBatch) {
        let batch = Arc::new(batch);
        *self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(batch);
    }

    pub fn is_populated(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}
