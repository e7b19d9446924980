//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with last-access tracking.

use std::time::Duration;

use tokio::time::Instant;

// == Cache Entry ==
/// A single stored key/value pair plus its last-access timestamp.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The key this entry is stored under
    pub key: String,
    /// The stored value
    pub value: V,
    /// Monotonic time of the last `has`/`get`/`set` on this key
    pub last_access: Instant,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry accessed at `now`.
    pub fn new(key: String, value: V, now: Instant) -> Self {
        Self {
            key,
            value,
            last_access: now,
        }
    }

    // == Touch ==
    /// Records an access at `now`.
    pub fn touch(&mut self, now: Instant) {
        self.last_access = now;
    }

    // == Is Expired ==
    /// Checks if the entry has gone unaccessed for at least `ttl`.
    ///
    /// Boundary condition: once exactly `ttl` has elapsed the entry is expired.
    pub fn is_expired(&self, ttl: Duration, now: Instant) -> bool {
        now.saturating_duration_since(self.last_access) >= ttl
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_millis(1000);

    #[test]
    fn test_entry_creation() {
        let now = Instant::now();
        let entry = CacheEntry::new("key".to_string(), 42, now);

        assert_eq!(entry.key, "key");
        assert_eq!(entry.value, 42);
        assert_eq!(entry.last_access, now);
        assert!(!entry.is_expired(TTL, now));
    }

    #[test]
    fn test_entry_expiration() {
        let now = Instant::now();
        let entry = CacheEntry::new("key".to_string(), "value", now);

        assert!(!entry.is_expired(TTL, now + Duration::from_millis(999)));
        assert!(entry.is_expired(TTL, now + Duration::from_millis(1100)));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let now = Instant::now();
        let entry = CacheEntry::new("key".to_string(), (), now);

        // Exactly ttl since last access counts as expired
        assert!(entry.is_expired(TTL, now + TTL));
    }

    #[test]
    fn test_touch_resets_expiry() {
        let start = Instant::now();
        let mut entry = CacheEntry::new("key".to_string(), 1, start);

        entry.touch(start + Duration::from_millis(800));

        assert!(!entry.is_expired(TTL, start + Duration::from_millis(1500)));
        assert!(entry.is_expired(TTL, start + Duration::from_millis(1800)));
    }
}
