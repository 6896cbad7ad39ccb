//! Receipt Processor - scores purchase receipts and serves the results
//!
//! Scores are kept in a bounded, thread-safe LRU cache; the oldest unused
//! score is evicted once the cache is full.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod receipt;

pub use api::AppState;
pub use config::Config;
