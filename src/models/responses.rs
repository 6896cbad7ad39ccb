//! Response DTOs for the receipt processor API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::receipt::Score;

/// Response body for POST /receipts/process
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessResponse {
    /// Identifier the score is stored under
    pub id: String,
}

impl ProcessResponse {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Response body for GET /receipts/:id/points
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointsResponse {
    pub points: Score,
}

impl PointsResponse {
    pub fn new(points: Score) -> Self {
        Self { points }
    }
}

/// Response body for the admin stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of score lookups that found an entry
    pub hits: u64,
    /// Number of score lookups for unknown or evicted ids
    pub misses: u64,
    /// Number of evictions
    pub evictions: u64,
    /// Current number of stored scores
    pub total_entries: usize,
    /// Maximum number of stored scores
    pub capacity: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            total_entries: stats.total_entries,
            capacity: stats.capacity,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_response_serialize() {
        let resp = ProcessResponse::new("7fb1377b-b223-49d9-a31a-5a02701dd310");
        let json = serde_json::to_string(&resp).unwrap();
        assert_eq!(json, r#"{"id":"7fb1377b-b223-49d9-a31a-5a02701dd310"}"#);
    }

    #[test]
    fn test_points_response_serialize() {
        let json = serde_json::to_string(&PointsResponse::new(65535)).unwrap();
        assert_eq!(json, r#"{"points":65535}"#);
    }

    #[test]
    fn test_stats_response_from_cache_stats() {
        let stats = CacheStats {
            hits: 80,
            misses: 20,
            evictions: 5,
            total_entries: 100,
            capacity: 100,
        };
        let resp = StatsResponse::from(stats);
        assert!((resp.hit_rate - 0.8).abs() < 0.001);
        assert_eq!(resp.capacity, 100);
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }

    #[test]
    fn test_error_response_serialize() {
        let json = serde_json::to_string(&ErrorResponse::new("The receipt is invalid.")).unwrap();
        assert_eq!(json, r#"{"error":"The receipt is invalid."}"#);
    }
}
