//! Cache statistics tracking

use std::fmt;

/// Counters describing how a [`BoundedCache`](crate::BoundedCache) has been used
///
/// Cloning takes a snapshot that later cache activity does not change.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CacheStats {
    hits: u64,
    misses: u64,
    evictions: u64,
    inserts: u64,
    producer_failures: u64,
}

impl CacheStats {
    /// Create new stats tracker
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub(crate) fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub(crate) fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub(crate) fn record_insert(&mut self) {
        self.inserts += 1;
    }

    pub(crate) fn record_producer_failure(&mut self) {
        self.producer_failures += 1;
    }

    /// Lookups answered from the cache
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Lookups that had to run the producer
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Entries dropped to make room for new ones
    pub fn evictions(&self) -> u64 {
        self.evictions
    }

    /// Entries added after a successful producer call
    pub fn inserts(&self) -> u64 {
        self.inserts
    }

    /// Misses whose producer returned an error
    pub fn producer_failures(&self) -> u64 {
        self.producer_failures
    }

    /// Calculate hit ratio (0.0 to 1.0)
    pub fn hit_ratio(&self) -> f64 {
        let hits = self.hits();
        let total = hits + self.misses();
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    }

    /// Reset all statistics
    pub fn reset(&mut self) {
        self.hits = 0;
        self.misses = 0;
        self.evictions = 0;
        self.inserts = 0;
        self.producer_failures = 0;
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hits={} misses={} evictions={} inserts={} producer_failures={} hit_ratio={:.2}",
            self.hits(),
            self.misses(),
            self.evictions(),
            self.inserts(),
            self.producer_failures(),
            self.hit_ratio()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_basic() {
        let mut stats = CacheStats::new();

        stats.record_hit();
        stats.record_hit();
        stats.record_miss();

        assert_eq!(stats.hits(), 2);
        assert_eq!(stats.misses(), 1);
        assert_eq!(stats.hit_ratio(), 2.0 / 3.0);
    }

    #[test]
    fn test_stats_empty_ratio() {
        let stats = CacheStats::new();
        assert_eq!(stats.hit_ratio(), 0.0);
    }

    #[test]
    fn test_stats_reset() {
        let mut stats = CacheStats::new();

        stats.record_hit();
        stats.record_miss();
        stats.record_eviction();
        stats.record_insert();
        stats.record_producer_failure();
        stats.reset();

        assert_eq!(stats.hits(), 0);
        assert_eq!(stats.misses(), 0);
        assert_eq!(stats.evictions(), 0);
        assert_eq!(stats.inserts(), 0);
        assert_eq!(stats.producer_failures(), 0);
        assert_eq!(stats.hit_ratio(), 0.0);
    }

    #[test]
    fn test_stats_snapshot() {
        let mut stats = CacheStats::new();
        stats.record_miss();

        let snapshot = stats.clone();
        stats.record_hit();

        assert_eq!(snapshot.hits(), 0);
        assert_eq!(snapshot.misses(), 1);
        assert_ne!(snapshot, stats);
    }

    #[test]
    fn test_stats_display() {
        let mut stats = CacheStats::new();

        stats.record_hit();
        stats.record_miss();
        stats.record_insert();

        assert_eq!(
            stats.to_string(),
            "hits=1 misses=1 evictions=0 inserts=1 producer_failures=0 hit_ratio=0.50"
        );
    }
}
