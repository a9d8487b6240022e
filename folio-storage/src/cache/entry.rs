use std::time::{Duration, Instant};

/// A cached value with the time it was stored and how long it stays live.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    pub data: V,
    pub inserted_at: Instant,
    pub ttl: Duration,
}

impl<V> CacheEntry<V> {
    pub fn new(data: V, ttl: Duration) -> Self {
        Self {
            data,
            inserted_at: Instant::now(),
            ttl,
        }
    }

    /// Whether the entry is still live at `now`.
    ///
    /// An entry is live up to and including `inserted_at + ttl`.
    pub fn is_live_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.inserted_at) <= self.ttl
    }

    pub fn is_live(&self) -> bool {
        self.is_live_at(Instant::now())
    }

    pub fn age(&self) -> Duration {
        self.inserted_at.elapsed()
    }
}
