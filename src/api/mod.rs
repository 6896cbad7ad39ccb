//! API Module
//!
//! HTTP handlers and routing for the receipt processor.
//!
//! # Endpoints
//! - `POST /receipts/process` - Score and store a receipt
//! - `GET /receipts/:id/points` - Retrieve a stored score
//! - `GET /health` - Health check endpoint
//! - `GET /stats` - Cache statistics (admin router only)

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::{create_admin_router, create_router};
