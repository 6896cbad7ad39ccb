//! Response models for the receipt processor API
//!
//! DTOs serialized into HTTP response bodies. Request bodies are the
//! [`Receipt`](crate::receipt::Receipt) itself.

pub mod responses;

// Re-export commonly used types
pub use responses::{
    ErrorResponse, HealthResponse, PointsResponse, ProcessResponse, StatsResponse,
};
