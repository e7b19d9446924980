//! Cache Store Module
//!
//! Main cache engine combining a key map with LRU tracking and TTL expiration.

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, LruTracker, NodeId};

/// Upper bound on up-front allocation; larger caches grow on demand
const MAX_PREALLOCATED_ENTRIES: usize = 1024;

// == Cache Store ==
/// Main cache storage with LRU eviction and TTL support.
///
/// The recency list owns every entry; the map holds a handle to each one so
/// lookups, touches and removals never scan. Expiry is checked lazily on every
/// access, so an expired entry is never returned even if no sweep has run yet.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key to recency-list handle
    entries: HashMap<String, NodeId>,
    /// Entries ordered from least to most recently accessed
    lru: LruTracker<CacheEntry<V>>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    item_limit: usize,
    /// Time an entry may go unaccessed before it expires
    ttl: Duration,
}

impl<V> CacheStore<V> {
    // == Constructor ==
    /// Creates a new CacheStore with the given TTL and capacity.
    ///
    /// An `item_limit` of 0 is raised to 1. Use [`crate::LruTtlCache`] for a
    /// validated, shared cache.
    pub fn new(ttl: Duration, item_limit: usize) -> Self {
        let item_limit = item_limit.max(1);
        let initial = item_limit.min(MAX_PREALLOCATED_ENTRIES);
        Self {
            entries: HashMap::with_capacity(initial),
            lru: LruTracker::with_capacity(initial),
            stats: CacheStats::new(),
            item_limit,
            ttl,
        }
    }

    // == Has ==
    /// Returns whether a live entry exists for `key`, refreshing it if so.
    ///
    /// An expired entry is removed and reported as absent.
    pub fn has(&mut self, key: &str) -> bool {
        let now = Instant::now();
        match self.live_handle(key, now) {
            Some(id) => {
                self.touch(id, now);
                self.stats.record_hit();
                true
            }
            None => {
                self.stats.record_miss();
                false
            }
        }
    }

    // == Get ==
    /// Retrieves a value by key, refreshing its recency and TTL.
    ///
    /// Returns None if the key is missing or expired.
    pub fn get(&mut self, key: &str) -> Option<&V> {
        let now = Instant::now();
        match self.live_handle(key, now) {
            Some(id) => {
                self.touch(id, now);
                self.stats.record_hit();
                self.lru.get(id).map(|entry| &entry.value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    /// Same as [`CacheStore::get`] but hands out a mutable reference.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let now = Instant::now();
        match self.live_handle(key, now) {
            Some(id) => {
                self.touch(id, now);
                self.stats.record_hit();
                self.lru.get_mut(id).map(|entry| &mut entry.value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Peek ==
    /// Looks up a live value without refreshing it or counting a hit.
    pub fn peek(&self, key: &str) -> Option<&V> {
        let now = Instant::now();
        let id = *self.entries.get(key)?;
        self.lru
            .get(id)
            .filter(|entry| !entry.is_expired(self.ttl, now))
            .map(|entry| &entry.value)
    }

    // == Set ==
    /// Stores a key-value pair.
    ///
    /// A live key keeps its entry: the value is replaced and the entry refreshed.
    /// A new (or expired) key at capacity first drops expired entries, then
    /// evicts the least recently used one if the cache is still full.
    pub fn set(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        let now = Instant::now();

        if let Some(id) = self.live_handle(&key, now) {
            if let Some(entry) = self.lru.get_mut(id) {
                entry.value = value;
                entry.touch(now);
            }
            self.lru.touch(id);
            return;
        }

        if self.entries.len() >= self.item_limit {
            self.purge_expired(now);
        }
        while self.entries.len() >= self.item_limit {
            self.evict_oldest();
        }

        let id = self.lru.push_back(CacheEntry::new(key.clone(), value, now));
        self.entries.insert(key, id);
        self.stats.set_total_entries(self.entries.len());
        self.debug_check();
    }

    // == Remove ==
    /// Removes an entry by key, returning its value if it was still live.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let now = Instant::now();
        let id = self.entries.remove(key)?;
        let entry = self.lru.remove(id)?;
        self.stats.set_total_entries(self.entries.len());
        self.debug_check();

        if entry.is_expired(self.ttl, now) {
            self.stats.record_expirations(1);
            None
        } else {
            Some(entry.value)
        }
    }

    /// Drops every entry. Statistics counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.lru.clear();
        self.stats.set_total_entries(0);
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        self.purge_expired(Instant::now())
    }

    /// Keys of live entries, least recently used first.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        let now = Instant::now();
        let ttl = self.ttl;
        self.lru
            .iter()
            .filter(move |entry| !entry.is_expired(ttl, now))
            .map(|entry| entry.key.as_str())
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Length ==
    /// Returns the number of stored entries, including expired ones not yet swept.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Time an entry may go unaccessed before it expires.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Maximum number of entries kept.
    pub fn item_limit(&self) -> usize {
        self.item_limit
    }

    /// Handle of the live entry for `key`, dropping it if it has expired.
    fn live_handle(&mut self, key: &str, now: Instant) -> Option<NodeId> {
        let id = *self.entries.get(key)?;
        let expired = self
            .lru
            .get(id)
            .map_or(true, |entry| entry.is_expired(self.ttl, now));
        if !expired {
            return Some(id);
        }

        self.entries.remove(key);
        self.lru.remove(id);
        self.stats.record_expirations(1);
        self.stats.set_total_entries(self.entries.len());
        self.debug_check();
        None
    }

    fn touch(&mut self, id: NodeId, now: Instant) {
        if let Some(entry) = self.lru.get_mut(id) {
            entry.touch(now);
        }
        self.lru.touch(id);
    }

    fn evict_oldest(&mut self) {
        if let Some(entry) = self.lru.evict_oldest() {
            self.entries.remove(&entry.key);
            self.stats.record_eviction();
            debug!(key = %entry.key, "Evicted least recently used entry");
        }
    }

    /// The list is ordered by last access, so expired entries form a prefix.
    fn purge_expired(&mut self, now: Instant) -> usize {
        let mut removed = 0;
        while self
            .lru
            .peek_oldest()
            .is_some_and(|entry| entry.is_expired(self.ttl, now))
        {
            if let Some(entry) = self.lru.evict_oldest() {
                self.entries.remove(&entry.key);
                removed += 1;
            }
        }

        self.stats.record_expirations(removed);
        self.stats.set_total_entries(self.entries.len());
        self.debug_check();
        removed
    }

    fn debug_check(&self) {
        debug_assert_eq!(
            self.entries.len(),
            self.lru.len(),
            "key map and recency list out of sync"
        );
    }
}
