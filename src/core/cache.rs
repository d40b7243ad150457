//! In-memory LRU cache for reconciled predictions
//!
//! Entries are keyed by the data-context generation they were computed
//! against. Publishing a new context bumps the generation, so stale entries
//! are never hit again and simply age out of the LRU.

use lru::LruCache;
use parking_lot::Mutex;
use std::{hash::Hash, num::NonZeroUsize};

use crate::engine::PredictionResult;
use crate::{PlayerId, Position, Week};

/// Cache key for one reconciled prediction
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PredictionCacheKey {
    pub player_id: PlayerId,
    pub position: Position,
    pub week: Week,
    pub generation: u64,
}

/// Thread-safe bounded LRU map
pub struct MemoryCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    entries: Mutex<LruCache<K, V>>,
    capacity: usize,
}

impl<K, V> MemoryCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            capacity: capacity.get(),
        }
    }

    pub fn get(&self, key: &K) -> Option<V> {
        self.entries.lock().get(key).cloned()
    }

    pub fn put(&self, key: K, value: V) {
        self.entries.lock().put(key, value);
    }

    /// Cached value for `key`, computing and storing it on a miss.
    ///
    /// The lock is not held while `compute` runs.
    pub fn get_or_insert_with<F>(&self, key: K, compute: F) -> V
    where
        F: FnOnce() -> V,
    {
        if let Some(value) = self.get(&key) {
            return value;
        }
        let value = compute();
        self.put(key, value.clone());
        value
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// (entries used, capacity)
    pub fn stats(&self) -> (usize, usize) {
        (self.entries.lock().len(), self.capacity)
    }
}

pub type PredictionCache = MemoryCache<PredictionCacheKey, PredictionResult>;
