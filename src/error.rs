//! Error types for the receipt processor
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;
use crate::receipt::{ScoringError, ValidationError};

/// Body returned for unknown or evicted receipt ids.
pub const NOT_FOUND_MESSAGE: &str = "No receipt found for that ID.";

/// Body returned for receipts that fail validation or cannot be parsed.
pub const INVALID_RECEIPT_MESSAGE: &str = "The receipt is invalid.";

// == Receipt Error Enum ==
/// Unified error type surfaced at the service boundary.
#[derive(Error, Debug)]
pub enum ReceiptError {
    /// No score is stored under the identifier (never written or evicted)
    #[error("No receipt found for id: {0}")]
    NotFound(String),

    /// Caller supplied an unusable receipt or identifier
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A contract was broken inside the service
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ValidationError> for ReceiptError {
    fn from(err: ValidationError) -> Self {
        ReceiptError::InvalidRequest(err.to_string())
    }
}

impl From<ScoringError> for ReceiptError {
    fn from(err: ScoringError) -> Self {
        ReceiptError::Internal(err.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ReceiptError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ReceiptError::NotFound(_) => (StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE),
            ReceiptError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, INVALID_RECEIPT_MESSAGE),
            ReceiptError::Internal(detail) => {
                tracing::error!(%detail, "request failed on an internal contract violation");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error.")
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the receipt processor.
pub type Result<T> = std::result::Result<T, ReceiptError>;
