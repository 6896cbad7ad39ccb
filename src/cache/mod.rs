//! Cache Module
//!
//! Provides a bounded in-memory cache with LRU eviction, safe to share
//! between request handlers.

mod lru;
mod stats;
mod store;


// Re-export public types
pub use lru::RecencyList;
pub use stats::CacheStats;
pub use store::BoundedCache;
