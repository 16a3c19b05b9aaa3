//! Bounded, time-expiring memo of completion results.

use log::debug;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::Instant;

struct CachedCompletion {
    text: String,
    stored_at: Instant,
}

/// LRU map from prompt to completion text. Entries older than `ttl` are treated as absent
/// and dropped when next looked up; inserting past `capacity` evicts the least recently
/// used entry.
pub struct CompletionCache {
    entries: Mutex<LruCache<String, CachedCompletion>>,
    ttl: Duration,
}

impl CompletionCache {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            ttl,
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let mut entries = self.lock();
        let expired = match entries.get(key) {
            Some(entry) if entry.stored_at.elapsed() < self.ttl => {
                return Some(entry.text.clone());
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            entries.pop(key);
            debug!("Dropped expired completion cache entry");
        }
        None
    }

    pub fn insert(&self, key: String, text: String) {
        let mut entries = self.lock();
        if let Some((evicted, _)) = entries.push(
            key.clone(),
            CachedCompletion {
                text,
                stored_at: Instant::now(),
            },
        ) {
            if evicted != key {
                debug!("Completion cache full; evicted least recently used entry");
            }
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<String, CachedCompletion>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
