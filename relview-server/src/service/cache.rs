//! Time-boxed in-memory cache
//!
//! Entries expire `ttl` after they were set. There is no background sweep:
//! an expired entry is evicted the next time its key is read. Concurrent
//! readers that both miss will both refill the entry; the last write wins.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// Lifetime of an entry when none is given
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

struct CacheEntry<T> {
    data: T,
    expires_at: Instant,
}

/// Thread-safe string-keyed cache with a per-entry time to live
pub struct TtlCache<T> {
    entries: Mutex<HashMap<String, CacheEntry<T>>>,
    ttl: Duration,
}

impl<T: Clone> TtlCache<T> {
    /// Creates an empty cache whose entries live for `ttl`
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the entry for `key` unless it is missing or expired
    pub fn get(&self, key: &str) -> Option<T> {
        let mut entries = self.lock();

        match entries.get(key) {
            Some(entry) if Instant::now() <= entry.expires_at => Some(entry.data.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Stores `data` under `key` with the cache's default ttl
    pub fn set(&self, key: impl Into<String>, data: T) -> T {
        self.set_with_ttl(key, data, self.ttl)
    }

    /// Stores `data` under `key`, replacing any previous entry
    pub fn set_with_ttl(&self, key: impl Into<String>, data: T, ttl: Duration) -> T {
        let entry = CacheEntry {
            data: data.clone(),
            expires_at: Instant::now() + ttl,
        };
        self.lock().insert(key.into(), entry);
        data
    }

    /// Removes every key containing `pattern`, or everything without one
    ///
    /// Returns the number of removed entries.
    pub fn invalidate(&self, pattern: Option<&str>) -> usize {
        let mut entries = self.lock();
        let before = entries.len();

        match pattern {
            Some(pattern) => entries.retain(|key, _| !key.contains(pattern)),
            None => entries.clear(),
        }

        before - entries.len()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry<T>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Clone> Default for TtlCache<T> {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_get_missing_key() {
        let cache: TtlCache<u32> = TtlCache::default();
        assert_eq!(cache.ttl(), Duration::from_secs(300));
        assert_eq!(cache.get("pipelines"), None);
    }

    #[test]
    fn test_set_returns_data_and_is_readable() {
        let cache = TtlCache::new(Duration::from_secs(60));
        assert_eq!(cache.set("pipelines", vec![1, 2, 3]), vec![1, 2, 3]);
        assert_eq!(cache.get("pipelines"), Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_expired_entry_is_evicted_on_read() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.set_with_ttl("short", 1, Duration::from_millis(5));
        cache.set("long", 2);

        thread::sleep(Duration::from_millis(20));

        assert_eq!(cache.get("short"), None);
        assert_eq!(cache.get("long"), Some(2));
        // The expired entry is gone, only "long" is left to invalidate
        assert_eq!(cache.invalidate(None), 1);
    }

    #[test]
    fn test_last_write_wins() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.set("pipelines", 1);
        cache.set("pipelines", 2);
        assert_eq!(cache.get("pipelines"), Some(2));
    }

    #[test]
    fn test_invalidate_by_substring() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.set("pipelines", 1);
        cache.set("runs:pipelines:42", 2);
        cache.set("timeline:7", 3);

        assert_eq!(cache.invalidate(Some("pipelines")), 2);
        assert_eq!(cache.get("pipelines"), None);
        assert_eq!(cache.get("runs:pipelines:42"), None);
        assert_eq!(cache.get("timeline:7"), Some(3));
    }

    #[test]
    fn test_invalidate_everything() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.set("a", 1);
        cache.set("b", 2);

        assert_eq!(cache.invalidate(None), 2);
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("b"), None);
    }

    #[test]
    fn test_shared_across_threads() {
        let cache = std::sync::Arc::new(TtlCache::new(Duration::from_secs(60)));

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let cache = std::sync::Arc::clone(&cache);
                thread::spawn(move || {
                    cache.set(format!("key-{}", i), i);
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        for i in 0..4 {
            assert_eq!(cache.get(&format!("key-{}", i)), Some(i));
        }
    }
}
