//! Shared Cache Module
//!
//! Thread-safe cache handle tying the store and its TTL sweeper together.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::cache::{CacheStats, CacheStore};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::tasks::spawn_cleanup_task;

// == LRU TTL Cache ==
/// LRU cache with a uniform TTL, safe to share between threads.
///
/// Every operation takes a single lock around the store, so the key map and
/// recency list are always observed together. A background sweeper removes
/// entries nobody touched within the TTL; it is cancelled when the cache is
/// dropped or [`LruTtlCache::close`] is called.
///
/// Share it with `Arc<LruTtlCache<V>>`.
#[derive(Debug)]
pub struct LruTtlCache<V> {
    store: Arc<Mutex<CacheStore<V>>>,
    config: Config,
    cancel: CancellationToken,
    sweeper: JoinHandle<()>,
}

impl<V> LruTtlCache<V>
where
    V: Send + 'static,
{
    // == Constructor ==
    /// Creates a cache and starts its sweeper on the current Tokio runtime.
    ///
    /// Fails with [`CacheError::InvalidConfig`] on a zero TTL or item limit,
    /// and with [`CacheError::NoRuntime`] outside a Tokio runtime.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let runtime =
            Handle::try_current().map_err(|e| CacheError::NoRuntime(e.to_string()))?;
        Self::with_handle(config, &runtime)
    }

    // == Constructor With Runtime ==
    /// Creates a cache whose sweeper runs on the given runtime.
    pub fn with_handle(config: Config, runtime: &Handle) -> Result<Self> {
        config.validate()?;

        let store = Arc::new(Mutex::new(CacheStore::new(
            config.ttl(),
            config.item_limit,
        )));
        let cancel = CancellationToken::new();
        let sweeper =
            spawn_cleanup_task(runtime, &store, config.sweep_interval(), cancel.clone());

        info!(
            "Cache created: ttl={}ms, item_limit={}",
            config.ttl_ms, config.item_limit
        );

        Ok(Self {
            store,
            config,
            cancel,
            sweeper,
        })
    }
}

impl<V> LruTtlCache<V> {
    // == Has ==
    /// Returns whether a live entry exists for `key`, refreshing it if so.
    pub fn has(&self, key: &str) -> bool {
        self.store.lock().has(key)
    }

    // == Set ==
    /// Stores a value, evicting the least recently used entry if the cache is full.
    pub fn set(&self, key: impl Into<String>, value: V) {
        self.store.lock().set(key, value);
    }

    // == Remove ==
    /// Removes an entry, returning its value if it was still live.
    pub fn remove(&self, key: &str) -> Option<V> {
        self.store.lock().remove(key)
    }

    // == Length ==
    /// Number of stored entries, including expired ones awaiting the next sweep.
    pub fn len(&self) -> usize {
        self.store.lock().len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.store.lock().is_empty()
    }

    // == Clear ==
    /// Drops every entry. Statistics counters are kept.
    pub fn clear(&self) {
        self.store.lock().clear();
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.store.lock().stats()
    }

    /// Configuration this cache was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    // == Close ==
    /// Stops the background sweeper. Idempotent.
    ///
    /// The cache stays usable; expired entries are still hidden from lookups
    /// but are only reclaimed when touched or evicted.
    pub fn close(&self) {
        if !self.cancel.is_cancelled() {
            self.cancel.cancel();
        }
    }

    /// Whether the sweeper task has exited.
    pub fn is_closed(&self) -> bool {
        self.sweeper.is_finished()
    }
}

impl<V: Clone> LruTtlCache<V> {
    // == Get ==
    /// Retrieves a clone of the value for `key`, refreshing its recency and TTL.
    pub fn get(&self, key: &str) -> Option<V> {
        self.store.lock().get(key).cloned()
    }

    // == Get Or Insert ==
    /// Returns the cached value or computes, stores and returns a new one.
    ///
    /// `init` runs without the lock held, so it may use the cache itself.
    /// Concurrent callers racing on the same missing key may each compute a value;
    /// the last one stored wins.
    pub fn get_or_insert_with<F>(&self, key: &str, init: F) -> V
    where
        F: FnOnce() -> V,
    {
        if let Some(value) = self.get(key) {
            return value;
        }
        let value = init();
        self.set(key, value.clone());
        value
    }
}

// == Drop ==
impl<V> Drop for LruTtlCache<V> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
