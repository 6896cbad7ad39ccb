//! API Handlers
//!
//! HTTP request handlers for the receipts and admin endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use tracing::debug;

use crate::cache::BoundedCache;
use crate::config::Config;
use crate::error::{ReceiptError, Result};
use crate::models::{HealthResponse, PointsResponse, ProcessResponse, StatsResponse};
use crate::receipt::{is_valid_id, Receipt, ReceiptService, ScoreRepository, ScoringEngine};

/// Application state shared across all handlers.
///
/// The service is cheap to clone; every clone shares one score cache.
#[derive(Clone)]
pub struct AppState {
    pub service: ReceiptService,
}

impl AppState {
    pub fn new(service: ReceiptService) -> Self {
        Self { service }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Builds the score cache, repository and scoring engine.
    pub fn from_config(config: &Config) -> Self {
        let cache = Arc::new(BoundedCache::new(config.cache_capacity));
        let repository = ScoreRepository::new(cache);
        let engine = ScoringEngine::new(config.options.clone(), config.multipliers.clone());
        Self::new(ReceiptService::new(repository, engine))
    }
}

/// Handler for POST /receipts/process
///
/// Validates and scores the receipt, returning the id it is stored under.
pub async fn process_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<Receipt>, JsonRejection>,
) -> Result<Json<ProcessResponse>> {
    let Json(receipt) = payload.map_err(|rejection| {
        debug!(error = %rejection, "receipt body rejected");
        ReceiptError::InvalidRequest(rejection.body_text())
    })?;

    receipt.validate()?;

    let id = state.service.generate_id("");
    let response = state.service.process_receipt(&receipt, &id)?;

    Ok(Json(response))
}

/// Handler for GET /receipts/:id/points
///
/// Looks up the score stored for an id.
pub async fn points_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PointsResponse>> {
    if !is_valid_id(&id) {
        debug!(id, "malformed receipt id");
        return Err(ReceiptError::InvalidRequest(format!("malformed id {id:?}")));
    }

    let response = state.service.get_score(&id)?;
    Ok(Json(response))
}

/// Handler for GET /stats (admin)
///
/// Returns score cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.service.cache_stats()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::receipt::Item;

    fn test_state() -> AppState {
        AppState::from_config(&Config::default())
    }

    fn receipt() -> Receipt {
        Receipt {
            retailer: "M&M Corner Market".to_string(),
            purchase_date: "2022-03-20".to_string(),
            purchase_time: "14:33".to_string(),
            items: vec![Item::new("Gatorade", "2.25"); 4],
            total: "9.00".to_string(),
        }
    }

    #[tokio::test]
    async fn test_process_and_points_handler() {
        let state = test_state();

        let response = process_handler(State(state.clone()), Ok(Json(receipt())))
            .await
            .unwrap();
        let id = response.0.id.clone();
        assert!(is_valid_id(&id));

        let points = points_handler(State(state), Path(id)).await.unwrap();
        assert_eq!(points.points, 109);
    }

    #[tokio::test]
    async fn test_process_invalid_receipt() {
        let state = test_state();
        let mut bad = receipt();
        bad.total = "9".to_string();

        let result = process_handler(State(state.clone()), Ok(Json(bad))).await;
        assert!(matches!(result, Err(ReceiptError::InvalidRequest(_))));
        assert_eq!(state.service.cache_stats().total_entries, 0);
    }

    #[tokio::test]
    async fn test_points_unknown_id() {
        let result = points_handler(
            State(test_state()),
            Path("af523d7a-e8d0-4af0-8bbd-d2340a4da5a4".to_string()),
        )
        .await;
        assert!(matches!(result, Err(ReceiptError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_points_malformed_id() {
        let result = points_handler(State(test_state()), Path("af523d7a".to_string())).await;
        assert!(matches!(result, Err(ReceiptError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_stats_handler() {
        let state = test_state();

        let response = stats_handler(State(state)).await;
        assert_eq!(response.hits, 0);
        assert_eq!(response.misses, 0);
        assert_eq!(response.capacity, 1000);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
