//! Receipt processing service
//!
//! Ties the scoring engine to the score repository.

use tracing::{debug, info};

use super::id::{generate_id, IdGenerator};
use super::models::Receipt;
use super::repository::ScoreRepository;
use super::scoring::ScoringEngine;
use crate::cache::CacheStats;
use crate::error::Result;
use crate::models::{PointsResponse, ProcessResponse};

/// Scores receipts and answers score lookups.
#[derive(Clone)]
pub struct ReceiptService {
    repository: ScoreRepository,
    engine: ScoringEngine,
    id_generator: IdGenerator,
}

impl ReceiptService {
    pub fn new(repository: ScoreRepository, engine: ScoringEngine) -> Self {
        Self::with_id_generator(repository, engine, generate_id)
    }

    pub fn with_id_generator(
        repository: ScoreRepository,
        engine: ScoringEngine,
        id_generator: IdGenerator,
    ) -> Self {
        Self {
            repository,
            engine,
            id_generator,
        }
    }

    pub fn generate_id(&self, seed: &str) -> String {
        (self.id_generator)(seed)
    }

    /// Scores a validated receipt and stores the result under `id`.
    ///
    /// A receipt that skipped validation surfaces as an internal error.
    pub fn process_receipt(&self, receipt: &Receipt, id: &str) -> Result<ProcessResponse> {
        let score = self.engine.score(receipt)?;
        self.repository.write_score(id, score)?;

        info!(id, score, "receipt processed");
        Ok(ProcessResponse::new(id))
    }

    pub fn get_score(&self, id: &str) -> Result<PointsResponse> {
        let points = self.repository.read_score(id)?;

        debug!(id, points, "score lookup");
        Ok(PointsResponse::new(points))
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.repository.stats()
    }
}
