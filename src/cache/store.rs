//! Bounded Cache Module
//!
//! Thread-safe LRU cache combining a key index with the recency list under a
//! single lock.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::trace;

use crate::cache::{CacheStats, RecencyList};

// == Cache State ==
/// Lookup table and recency order. Both are only ever touched together.
#[derive(Debug)]
struct CacheState<K, V> {
    /// Key to arena slot
    index: HashMap<K, usize>,
    /// Entries ordered by last access
    recency: RecencyList<K, V>,
    stats: CacheStats,
}

// == Bounded Cache ==
/// Fixed-capacity key-value store with least-recently-used eviction.
///
/// `get` and `set` take `&self` and may be called from any number of threads;
/// each call holds one mutex for its whole duration, so no caller ever sees
/// the index and the recency list disagree.
#[derive(Debug)]
pub struct BoundedCache<K, V> {
    state: Mutex<CacheState<K, V>>,
    capacity: usize,
}

impl<K, V> BoundedCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    // == Constructor ==
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            state: Mutex::new(CacheState {
                index: HashMap::with_capacity(capacity),
                recency: RecencyList::with_capacity(capacity),
                stats: CacheStats::with_capacity(capacity),
            }),
            capacity,
        }
    }

    // Nothing inside the critical section can leave the state half-updated,
    // so a poisoned lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, CacheState<K, V>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // == Set ==
    /// Stores a value, making the key the most recently used.
    ///
    /// Overwriting an existing key never evicts. Inserting a new key into a
    /// full cache evicts exactly the least recently used entry, whose key is
    /// returned.
    pub fn set(&self, key: K, value: V) -> Option<K> {
        let mut guard = self.lock();
        let state = &mut *guard;

        if let Some(&idx) = state.index.get(&key) {
            state.recency.set_value(idx, value);
            state.recency.move_to_front(idx);
            return None;
        }

        let mut evicted = None;
        if state.index.len() >= self.capacity {
            if let Some((old_key, _)) = state.recency.pop_back() {
                state.index.remove(&old_key);
                state.stats.record_eviction();
                evicted = Some(old_key);
            }
        }

        let idx = state.recency.push_front(key.clone(), value);
        state.index.insert(key, idx);
        state.stats.set_total_entries(state.index.len());
        trace!(entries = state.index.len(), "cache insert");

        evicted
    }

    // == Get ==
    /// Returns a copy of the value and marks the key as most recently used.
    ///
    /// An absent key only counts a miss.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut guard = self.lock();
        let state = &mut *guard;

        match state.index.get(key) {
            Some(&idx) => {
                state.recency.move_to_front(idx);
                state.stats.record_hit();
                Some(state.recency.value(idx).clone())
            }
            None => {
                state.stats.record_miss();
                None
            }
        }
    }

    // == Contains ==
    /// Checks for a key without touching its recency.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.lock().index.contains_key(key)
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let state = self.lock();
        let mut stats = state.stats.clone();
        stats.set_total_entries(state.index.len());
        stats
    }

    /// Keys ordered from most to least recently used.
    pub fn keys_by_recency(&self) -> Vec<K> {
        self.lock().recency.keys().cloned().collect()
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.lock().index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
