//! Cache: thread-safe string cache over [`LruList`]

use std::fmt;
use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::lru::{LruList, Put};

/// Add/Get/Delete interface shared by string LRU caches
///
/// No operation can fail: misses and duplicate keys are reported through the
/// returned `bool` or `Option`.
pub trait LruCache: Send + Sync {
    /// Insert `key` as the most recently used entry
    ///
    /// Returns `true` if the key was new. An existing key still gets the new
    /// value and is promoted, but the call returns `false`.
    fn add(&self, key: &str, value: &str) -> bool;

    /// Look up `key`, promoting it on a hit
    fn get(&self, key: &str) -> Option<String>;

    /// Remove `key`, returning whether it was present
    fn delete(&self, key: &str) -> bool;
}

/// Fixed-capacity string cache with least-recently-used eviction
///
/// Every operation holds a single mutex for its full duration, so each call
/// is atomic with respect to the others. Share it across threads as
/// `Arc<Cache>`.
pub struct Cache {
    /// Recency-ordered entries
    inner: Mutex<LruList<String, String>>,

    /// Maximum number of entries (0 = unbounded)
    ///
    /// Copy of the list's bound so `capacity()` can answer without the lock.
    capacity: usize,
}

impl Cache {
    /// Create an empty cache
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of entries; 0 disables eviction
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(LruList::new(capacity)),
            capacity,
        }
    }

    /// Add or update an entry and mark it most recently used
    ///
    /// # Arguments
    /// * `key` - Entry key
    /// * `value` - Value to store under `key`
    ///
    /// # Returns
    /// * `true` - `key` was not present; the least recently used entry may
    ///   have been evicted to stay within capacity
    /// * `false` - `key` was present; its value was replaced and promoted
    pub fn add(&self, key: &str, value: &str) -> bool {
        let mut lru = self.inner.lock();
        match lru.put(key.to_owned(), value.to_owned()) {
            Put::Inserted => {
                trace!(key, "added entry");
                true
            }
            Put::Evicted(evicted, _) => {
                debug!(key, evicted = %evicted, capacity = self.capacity, "added entry, evicted LRU");
                true
            }
            Put::Updated => {
                trace!(key, "updated existing entry");
                false
            }
        }
    }

    /// Get a value and mark it most recently used
    ///
    /// # Returns
    /// * `Some(value)` - Hit; the entry is now at the front
    /// * `None` - Miss; nothing changes
    pub fn get(&self, key: &str) -> Option<String> {
        self.inner.lock().get(key).cloned()
    }

    /// Delete an entry
    ///
    /// # Returns
    /// * `true` if `key` was present and has been removed
    pub fn delete(&self, key: &str) -> bool {
        let removed = self.inner.lock().remove(key).is_some();
        if removed {
            trace!(key, "deleted entry");
        }
        removed
    }

    /// Get a value without changing its recency
    pub fn peek(&self, key: &str) -> Option<String> {
        self.inner.lock().peek(key).cloned()
    }

    /// Check whether `key` is cached without changing its recency
    pub fn contains(&self, key: &str) -> bool {
        self.inner.lock().contains(key)
    }

    /// Snapshot of the keys, most recently used first
    pub fn keys(&self) -> Vec<String> {
        self.inner.lock().iter().map(|(k, _)| k.clone()).collect()
    }

    /// Remove and return every entry, most recently used first
    pub fn drain(&self) -> Vec<(String, String)> {
        self.inner.lock().drain()
    }

    /// Drop every entry (capacity is unchanged)
    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Get current number of entries
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Get cache capacity (0 = unbounded)
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for Cache {
    /// Unbounded cache
    fn default() -> Self {
        Self::new(0)
    }
}

impl fmt::Debug for Cache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut dbg = f.debug_struct("Cache");
        dbg.field("capacity", &self.capacity);
        // The mutex is not reentrant; never block inside a formatter.
        match self.inner.try_lock() {
            Some(lru) => dbg.field("len", &lru.len()),
            None => dbg.field("len", &format_args!("<locked>")),
        };
        dbg.finish()
    }
}

impl LruCache for Cache {
    fn add(&self, key: &str, value: &str) -> bool {
        Cache::add(self, key, value)
    }

    fn get(&self, key: &str) -> Option<String> {
        Cache::get(self, key)
    }

    fn delete(&self, key: &str) -> bool {
        Cache::delete(self, key)
    }
}
