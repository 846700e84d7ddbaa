//! Bounded response cache for translation lookups.
//!
//! Keys are `TranslationRequest`s (source, target, query). Capacity is fixed
//! at construction; least recently used entries are evicted first. With a TTL
//! set, entries older than the TTL are treated as absent and dropped on
//! access.

use crate::translation::{TranslateResponse, TranslationRequest};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Default number of cached responses
pub const DEFAULT_CAPACITY: usize = 256;

#[derive(Debug, Clone)]
struct CachedResponse {
    response: TranslateResponse,
    cached_at: Instant,
}

impl CachedResponse {
    fn is_fresh(&self, ttl: Option<Duration>) -> bool {
        ttl.map_or(true, |ttl| self.cached_at.elapsed() < ttl)
    }
}

/// Cache statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub size: usize,
    pub capacity: usize,
}

/// LRU cache of backend responses, shared by reference.
#[derive(Debug)]
pub struct TranslationCache {
    entries: Mutex<LruCache<TranslationRequest, CachedResponse>>,
    ttl: Option<Duration>,
}

impl TranslationCache {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            ttl: None,
        }
    }

    /// Expire entries `ttl` after they were inserted.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }

    /// Get a cached response, refreshing its recency.
    pub fn get(&self, key: &TranslationRequest) -> Option<TranslateResponse> {
        let mut entries = self.entries.lock().ok()?;
        let lookup = entries
            .get(key)
            .map(|entry| entry.is_fresh(self.ttl).then(|| entry.response.clone()));

        match lookup {
            Some(Some(response)) => Some(response),
            Some(None) => {
                entries.pop(key);
                None
            }
            None => None,
        }
    }

    /// Insert a response, evicting the least recently used entry when full.
    pub fn insert(&self, key: TranslationRequest, response: TranslateResponse) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.put(
                key,
                CachedResponse {
                    response,
                    cached_at: Instant::now(),
                },
            );
        }
    }

    /// Number of stored entries, expired ones included until they are read.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every cached response.
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }

    /// Current size and capacity.
    ///
    /// # Returns
    /// Zeroed stats if the cache lock is poisoned.
    pub fn stats(&self) -> CacheStats {
        match self.entries.lock() {
            Ok(entries) => CacheStats {
                size: entries.len(),
                capacity: entries.cap().get(),
            },
            Err(_) => CacheStats {
                size: 0,
                capacity: 0,
            },
        }
    }
}

impl Default for TranslationCache {
    fn default() -> Self {
        Self::new(NonZeroUsize::new(DEFAULT_CAPACITY).unwrap_or(NonZeroUsize::MIN))
    }
}
