//! Key/value cache with per-entry TTL and lazy eviction.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use tracing::debug;

use super::CacheEntry;

/// Counters for cache effectiveness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Reads served from a live entry.
    pub hits: u64,
    /// Reads that found nothing live.
    pub misses: u64,
    /// Entries dropped because their TTL ran out.
    pub expired: u64,
    /// Entries currently held, live or not yet evicted.
    pub entries: u64,
}

impl CacheStats {
    /// Calculate the hit rate (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Thread-safe TTL cache.
///
/// Expired entries are removed when a read finds them, or in bulk by
/// [`TtlCache::clean_expired`]. A read-through load holds the map lock for
/// the duration of the loader, so concurrent callers for a key run the
/// loader once and writers that invalidate after committing can never be
/// overtaken by a load that read the old state. Loaders must therefore not
/// call back into the same cache.
pub struct TtlCache<K, V> {
    entries: Mutex<HashMap<K, CacheEntry<V>>>,
    default_ttl: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
    expired: AtomicU64,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
    V: Clone,
{
    /// Create an empty cache using `default_ttl` for entries stored without one.
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            default_ttl,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            expired: AtomicU64::new(0),
        }
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    // A panicking loader poisons the lock without leaving the map half
    // updated, so the guard is still safe to use.
    fn lock(&self) -> MutexGuard<'_, HashMap<K, CacheEntry<V>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Live value for `key`, evicting it if expired. Counts a hit or miss.
    fn lookup(&self, entries: &mut HashMap<K, CacheEntry<V>>, key: &K) -> Option<V> {
        match entries.get(key) {
            Some(entry) if entry.is_live() => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!(?key, "Cache hit");
                Some(entry.data.clone())
            }
            Some(_) => {
                entries.remove(key);
                self.expired.fetch_add(1, Ordering::Relaxed);
                self.misses.fetch_add(1, Ordering::Relaxed);
                debug!(?key, "Cache entry expired");
                None
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                debug!(?key, "Cache miss");
                None
            }
        }
    }

    /// Cached value for `key` if present and live.
    pub fn get(&self, key: &K) -> Option<V> {
        let mut entries = self.lock();
        self.lookup(&mut entries, key)
    }

    /// Store `value` under the default TTL, replacing any prior entry.
    pub fn set(&self, key: K, value: V) {
        self.set_with_ttl(key, value, self.default_ttl);
    }

    pub fn set_with_ttl(&self, key: K, value: V, ttl: Duration) {
        self.lock().insert(key, CacheEntry::new(value, ttl));
    }

    /// Drop one entry. Returns whether anything was removed.
    pub fn delete(&self, key: &K) -> bool {
        let removed = self.lock().remove(key).is_some();
        if removed {
            debug!(?key, "Cache entry invalidated");
        }
        removed
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Whether a live entry exists for `key`. Does not touch the counters.
    pub fn has(&self, key: &K) -> bool {
        self.lock().get(key).is_some_and(CacheEntry::is_live)
    }

    /// Read-through access: the live cached value, or the loader's result,
    /// which is stored under `ttl` (or the default TTL) before returning.
    pub fn get_or_load<F>(&self, key: K, ttl: Option<Duration>, loader: F) -> V
    where
        F: FnOnce() -> V,
    {
        let mut entries = self.lock();
        if let Some(value) = self.lookup(&mut entries, &key) {
            return value;
        }
        let value = loader();
        let ttl = ttl.unwrap_or(self.default_ttl);
        entries.insert(key, CacheEntry::new(value.clone(), ttl));
        value
    }

    /// Like [`TtlCache::get_or_load`] for fallible loaders.
    ///
    /// A failed load is returned to the caller and nothing is cached.
    pub fn get_or_try_load<F, E>(&self, key: K, ttl: Option<Duration>, loader: F) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        let mut entries = self.lock();
        if let Some(value) = self.lookup(&mut entries, &key) {
            return Ok(value);
        }
        let value = loader()?;
        let ttl = ttl.unwrap_or(self.default_ttl);
        entries.insert(key, CacheEntry::new(value.clone(), ttl));
        Ok(value)
    }

    /// Remove every expired entry. Returns how many were removed.
    pub fn clean_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|_, entry| entry.is_live_at(now));
        let removed = before - entries.len();
        if removed > 0 {
            self.expired.fetch_add(removed as u64, Ordering::Relaxed);
            debug!(removed, "Swept expired cache entries");
        }
        removed
    }

    /// Remove every entry whose key matches `predicate`.
    pub fn invalidate_where<P>(&self, predicate: P) -> usize
    where
        P: Fn(&K) -> bool,
    {
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|key, _| !predicate(key));
        before - entries.len()
    }

    /// Number of entries held, including expired ones not yet evicted.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            expired: self.expired.load(Ordering::Relaxed),
            entries: self.len() as u64,
        }
    }
}

impl<K, V> fmt::Debug for TtlCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
    V: Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TtlCache")
            .field("default_ttl", &self.default_ttl)
            .field("stats", &self.stats())
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::thread::sleep;

    const SHORT: Duration = Duration::from_millis(30);

    fn cache() -> TtlCache<String, u32> {
        TtlCache::new(Duration::from_secs(300))
    }

    #[test]
    fn test_set_get_overwrite() {
        let cache = cache();
        assert_eq!(cache.get(&"a".to_string()), None);
        cache.set("a".to_string(), 1);
        cache.set("a".to_string(), 2);
        assert_eq!(cache.get(&"a".to_string()), Some(2));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_expired_entry_is_evicted_on_read() {
        let cache = cache();
        cache.set_with_ttl("a".to_string(), 1, SHORT);
        assert!(cache.has(&"a".to_string()));
        sleep(SHORT * 2);

        assert!(!cache.has(&"a".to_string()));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&"a".to_string()), None);
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.stats().expired, 1);
    }

    #[test]
    fn test_delete_and_clear() {
        let cache = cache();
        cache.set("a".to_string(), 1);
        cache.set("b".to_string(), 2);
        assert!(cache.delete(&"a".to_string()));
        assert!(!cache.delete(&"a".to_string()));
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_get_or_load_calls_loader_once_within_ttl() {
        let cache = cache();
        let calls = AtomicUsize::new(0);
        for _ in 0..5 {
            let value = cache.get_or_load("a".to_string(), None, || {
                calls.fetch_add(1, Ordering::SeqCst);
                7
            });
            assert_eq!(value, 7);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let stats = cache.stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 4);
        assert!((stats.hit_rate() - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn test_get_or_load_reloads_after_delete_and_expiry() {
        let cache = cache();
        let calls = AtomicUsize::new(0);
        let load = || {
            calls.fetch_add(1, Ordering::SeqCst);
            1
        };

        cache.get_or_load("a".to_string(), Some(SHORT), load);
        cache.delete(&"a".to_string());
        cache.get_or_load("a".to_string(), Some(SHORT), load);
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        sleep(SHORT * 2);
        cache.get_or_load("a".to_string(), Some(SHORT), load);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_zero_ttl_entry_is_stored_then_expires() {
        let cache = cache();
        assert_eq!(cache.get_or_load("a".to_string(), Some(Duration::ZERO), || 7), 7);
        assert_eq!(cache.stats().entries, 1);

        sleep(Duration::from_millis(2));
        assert_eq!(cache.get(&"a".to_string()), None);
        assert_eq!(cache.stats().expired, 1);
    }

    #[test]
    fn test_failed_load_is_not_cached() {
        let cache = cache();
        let result: Result<u32, &str> =
            cache.get_or_try_load("a".to_string(), None, || Err("backend down"));
        assert_eq!(result, Err("backend down"));
        assert!(!cache.has(&"a".to_string()));

        let result: Result<u32, &str> = cache.get_or_try_load("a".to_string(), None, || Ok(3));
        assert_eq!(result, Ok(3));
        assert_eq!(cache.get(&"a".to_string()), Some(3));
    }

    #[test]
    fn test_clean_expired_keeps_live_entries() {
        let cache = cache();
        cache.set_with_ttl("short".to_string(), 1, SHORT);
        cache.set("long".to_string(), 2);
        sleep(SHORT * 2);

        assert_eq!(cache.clean_expired(), 1);
        assert_eq!(cache.clean_expired(), 0);
        assert_eq!(cache.get(&"long".to_string()), Some(2));
        assert_eq!(cache.stats().expired, 1);
    }

    #[test]
    fn test_invalidate_where() {
        let cache = cache();
        for key in ["project:1", "project:2", "skill:1"] {
            cache.set(key.to_string(), 0);
        }
        let removed = cache.invalidate_where(|key| key.starts_with("project:"));
        assert_eq!(removed, 2);
        assert!(cache.has(&"skill:1".to_string()));
    }

    #[test]
    fn test_concurrent_get_or_load_runs_loader_once() {
        let cache = cache();
        let calls = AtomicUsize::new(0);
        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    let value = cache.get_or_load("a".to_string(), None, || {
                        calls.fetch_add(1, Ordering::SeqCst);
                        sleep(Duration::from_millis(5));
                        42
                    });
                    assert_eq!(value, 42);
                });
            }
        });
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_panicking_loader_does_not_break_cache() {
        let cache = cache();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            cache.get_or_load("a".to_string(), None, || panic!("loader failed"))
        }));
        assert!(result.is_err());
        assert_eq!(cache.get_or_load("a".to_string(), None, || 5), 5);
    }
}

// ============================================================================
// PROPERTY-BASED TESTS
// ============================================================================

#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;
    use std::sync::atomic::AtomicUsize;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// Within the TTL window the loader runs at most once per key.
        #[test]
        fn prop_loader_runs_once_per_key(keys in prop::collection::vec(0u8..8, 1..50)) {
            let cache: TtlCache<u8, u8> = TtlCache::new(Duration::from_secs(300));
            let calls = AtomicUsize::new(0);
            for key in &keys {
                let value = cache.get_or_load(*key, None, || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    key.wrapping_mul(3)
                });
                prop_assert_eq!(value, key.wrapping_mul(3));
            }

            let mut distinct = keys.clone();
            distinct.sort_unstable();
            distinct.dedup();
            prop_assert_eq!(calls.load(Ordering::SeqCst), distinct.len());

            let stats = cache.stats();
            prop_assert_eq!(stats.hits + stats.misses, keys.len() as u64);
        }
    }
}
