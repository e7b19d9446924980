//! Cache Module
//!
//! In-memory key-value storage with TTL expiration and LRU eviction.

mod entry;
mod lru;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::CacheEntry;
pub use lru::{Iter, LruTracker, NodeId};
pub use stats::CacheStats;
pub use store::CacheStore;
