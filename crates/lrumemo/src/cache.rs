//! BoundedCache: memoizing LRU cache around a producer function

use std::collections::HashMap;
use std::hash::Hash;

use ahash::RandomState;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::recency::{EntryId, RecencyList};
use crate::stats::CacheStats;

/// Upper bound on map entries reserved up front; larger caches grow on demand
const MAX_PREALLOCATED: usize = 1024;

/// Fixed-capacity memoization cache with least-recently-used eviction
///
/// `get` answers hits from memory and runs the producer on misses. The key
/// map stores arena handles into the recency list, so hits, inserts and
/// evictions are all O(1).
///
/// The cache is single-threaded. To share one across threads, wrap it in a
/// mutex and hold the lock for the whole `get` call.
pub struct BoundedCache<K, V, F> {
    /// Key -> handle of the entry in `order`
    map: HashMap<K, EntryId, RandomState>,

    /// Entries ordered from least- to most-recently used
    order: RecencyList<(K, V)>,

    /// Computes values on a miss
    producer: F,

    /// Cache statistics
    stats: CacheStats,

    /// Maximum number of entries
    capacity: usize,
}

impl<K, V, F> BoundedCache<K, V, F>
where
    K: Hash + Eq + Clone,
{
    /// Create a new cache holding at most `capacity` results of `producer`
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of memoized entries (must be > 0)
    /// * `producer` - Computes the value for a key on a miss
    ///
    /// # Returns
    /// * `Result<BoundedCache>` - Empty cache, or `InvalidConfiguration`
    pub fn new<E>(capacity: usize, producer: F) -> Result<Self>
    where
        F: FnMut(&K) -> std::result::Result<V, E>,
    {
        if capacity == 0 {
            return Err(Error::InvalidConfiguration(
                "capacity must be greater than 0".to_string(),
            ));
        }

        Ok(Self {
            map: HashMap::with_capacity_and_hasher(
                capacity.min(MAX_PREALLOCATED),
                RandomState::new(),
            ),
            order: RecencyList::with_capacity(capacity),
            producer,
            stats: CacheStats::new(),
            capacity,
        })
    }

    /// Get the memoized value for `key`, computing it on a miss
    ///
    /// A hit promotes the entry to most-recently-used and does not call the
    /// producer. A miss calls the producer, evicts the least-recently-used
    /// entry if the cache is full, then stores the new value.
    ///
    /// # Returns
    /// * `Ok(&V)` - Cached or freshly computed value
    /// * `Err(E)` - The producer's error, unchanged; the cache is left as it was
    pub fn get<E>(&mut self, key: K) -> std::result::Result<&V, E>
    where
        F: FnMut(&K) -> std::result::Result<V, E>,
    {
        let id = match self.map.get(&key) {
            Some(&id) => {
                self.order.promote(id);
                self.stats.record_hit();
                trace!(len = self.order.len(), "cache hit");
                id
            }
            None => self.insert_new(key)?,
        };

        Ok(&self.order[id].1)
    }

    fn insert_new<E>(&mut self, key: K) -> std::result::Result<EntryId, E>
    where
        F: FnMut(&K) -> std::result::Result<V, E>,
    {
        self.stats.record_miss();

        // Nothing is touched until the producer has succeeded
        let value = match (self.producer)(&key) {
            Ok(value) => value,
            Err(err) => {
                self.stats.record_producer_failure();
                debug!(len = self.order.len(), "producer failed, cache unchanged");
                return Err(err);
            }
        };

        if self.map.len() == self.capacity {
            self.evict_lru();
        }

        let id = self.order.append_value((key.clone(), value));
        self.map.insert(key, id);
        self.stats.record_insert();
        trace!(
            len = self.order.len(),
            capacity = self.capacity,
            "cache miss, entry inserted"
        );

        debug_assert_eq!(self.map.len(), self.order.len());
        Ok(id)
    }
}

impl<K, V, F> BoundedCache<K, V, F>
where
    K: Hash + Eq,
{
    /// Look up `key` without promoting it or calling the producer
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.map.get(key).map(|&id| &self.order[id].1)
    }

    /// Check whether `key` is cached (does not promote)
    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Remove a key from the cache
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let id = self.map.remove(key)?;
        self.order.remove_entry(id);
        let (_, value) = self.order.release(id);
        Some(value)
    }

    /// Drop every entry and reset statistics
    pub fn clear(&mut self) {
        self.map.clear();
        self.order.clear();
        self.stats.reset();
        debug!(capacity = self.capacity, "cache cleared");
    }

    /// Iterate entries from least- to most-recently used
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.order.iter().map(|(key, value)| (key, value))
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Get current number of entries
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Get cache capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn evict_lru(&mut self) {
        if let Some((lru_key, _)) = self.order.pop_front() {
            self.map.remove(&lru_key);
            self.stats.record_eviction();
            debug!(capacity = self.capacity, "evicted least-recently-used entry");
        }
    }
}
