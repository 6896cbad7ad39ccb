//! Score repository
//!
//! Typed view over the bounded cache that stores receipt scores.

use std::sync::Arc;

use tracing::debug;

use super::models::Score;
use crate::cache::{BoundedCache, CacheStats};
use crate::error::{ReceiptError, Result};

/// Stores scores by receipt id.
///
/// Cloning is cheap and every clone shares the same cache.
#[derive(Debug, Clone)]
pub struct ScoreRepository {
    cache: Arc<BoundedCache<String, Score>>,
}

impl ScoreRepository {
    pub fn new(cache: Arc<BoundedCache<String, Score>>) -> Self {
        Self { cache }
    }

    /// Creates a repository over a fresh cache of the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::new(Arc::new(BoundedCache::new(capacity)))
    }

    pub fn write_score(&self, id: &str, score: Score) -> Result<()> {
        if let Some(evicted) = self.cache.set(id.to_string(), score) {
            debug!(id, evicted = %evicted, "score cache full, evicted least recently used receipt");
        }
        Ok(())
    }

    /// Reads a score; unknown and evicted ids are both `NotFound`.
    pub fn read_score(&self, id: &str) -> Result<Score> {
        self.cache
            .get(id)
            .ok_or_else(|| ReceiptError::NotFound(id.to_string()))
    }

    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }
}
