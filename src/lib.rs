//! LRU TTL Cache - An in-process generic key-value cache
//!
//! Bounds item count with Least-Recently-Used eviction and item lifetime with a
//! time-to-live measured from each entry's last access. Expired entries are never
//! returned and are reclaimed by a cancellable background sweeper.
//!
//! ```no_run
//! use lru_ttl_cache::{Config, LruTtlCache};
//!
//! # async fn demo() -> lru_ttl_cache::error::Result<()> {
//! let cache: LruTtlCache<String> = LruTtlCache::new(Config::new(1000, 2))?;
//! cache.set("a", "1".to_string());
//! assert!(cache.has("a"));
//! assert_eq!(cache.get("a").as_deref(), Some("1"));
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod shared;
pub mod tasks;

pub use cache::{CacheStats, CacheStore};
pub use config::Config;
pub use error::CacheError;
pub use shared::LruTtlCache;
pub use tasks::spawn_cleanup_task;
