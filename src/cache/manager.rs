// Response cache - TTL-bounded store for read-only upstream responses
// Author: kelexine (https://github.com/kelexine)

use crate::cache::models::{CacheConfig, CacheEntry, CacheKey, CacheStats};
use crate::metrics;
use crate::tmdb::UpstreamResponse;
use lru::LruCache;
use parking_lot::Mutex;
use std::future::Future;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tracing::debug;

/// Process-local cache for successful upstream responses.
///
/// Entries are never served past their expiry: lookups drop stale entries
/// lazily, and [`ResponseCache::spawn_purge_task`] sweeps the rest on an
/// interval. Writes to the same key are last-writer-wins. The lock is never
/// held across an upstream call.
pub struct ResponseCache {
    config: CacheConfig,
    entries: Mutex<LruCache<CacheKey, CacheEntry>>,
    stats: Mutex<CacheStats>,
}

impl ResponseCache {
    /// Create a new response cache
    pub fn new(config: CacheConfig) -> Self {
        let capacity = NonZeroUsize::new(config.max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            config,
            entries: Mutex::new(LruCache::new(capacity)),
            stats: Mutex::new(CacheStats::default()),
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Serve `key` from the cache, or run `producer` and store its result
    /// when the status is below 400.
    pub async fn get_or_fetch<F, Fut>(&self, key: CacheKey, producer: F) -> UpstreamResponse
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = UpstreamResponse>,
    {
        if !self.config.enabled {
            return producer().await;
        }

        if let Some(hit) = self.get(&key) {
            return hit;
        }

        let response = producer().await;
        if response.is_success() {
            self.insert(key, response.clone());
        } else {
            debug!("Not caching {} response for {}", response.status.as_u16(), key);
        }
        response
    }

    /// Look up a live entry, dropping it if it has expired.
    pub fn get(&self, key: &CacheKey) -> Option<UpstreamResponse> {
        let now = Instant::now();
        let mut entries = self.entries.lock();

        let lookup = entries
            .get(key)
            .map(|entry| entry.is_live(now).then(|| entry.response.clone()));

        let found = match lookup {
            Some(Some(response)) => Some(response),
            Some(None) => {
                entries.pop(key);
                self.stats.lock().expired += 1;
                metrics::record_cache_expired(1);
                debug!("Cache entry expired: {}", key);
                None
            }
            None => None,
        };
        let len = entries.len();
        drop(entries);

        let mut stats = self.stats.lock();
        if found.is_some() {
            debug!("Cache hit: {}", key);
            stats.hits += 1;
            metrics::record_cache_hit();
        } else {
            debug!("Cache miss: {}", key);
            stats.misses += 1;
            metrics::record_cache_miss();
        }
        metrics::update_cache_entries(len);

        found
    }

    /// Store a response with the configured TTL, overwriting any previous entry.
    pub fn insert(&self, key: CacheKey, response: UpstreamResponse) {
        self.insert_with_ttl(key, response, self.config.ttl);
    }

    pub fn insert_with_ttl(&self, key: CacheKey, response: UpstreamResponse, ttl: Duration) {
        let entry = CacheEntry::new(response, Instant::now(), ttl);

        let mut entries = self.entries.lock();
        let displaced = entries.push(key.clone(), entry);
        let len = entries.len();
        drop(entries);

        let mut stats = self.stats.lock();
        stats.stores += 1;
        metrics::record_cache_store();
        if let Some((old_key, _)) = displaced {
            if old_key != key {
                debug!("Evicted least recently used entry: {}", old_key);
                stats.evictions += 1;
                metrics::record_cache_eviction();
            }
        }
        metrics::update_cache_entries(len);
        debug!("Cached {} for {:?}", key, ttl);
    }

    /// Drop every expired entry. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.lock();

        let stale: Vec<CacheKey> = entries
            .iter()
            .filter(|(_, entry)| !entry.is_live(now))
            .map(|(key, _)| key.clone())
            .collect();
        for key in &stale {
            entries.pop(key);
        }
        let len = entries.len();
        drop(entries);

        if !stale.is_empty() {
            debug!("Purged {} expired cache entries", stale.len());
            self.stats.lock().expired += stale.len() as u64;
            metrics::record_cache_expired(stale.len());
        }
        metrics::update_cache_entries(len);
        stale.len()
    }

    /// Periodically purge expired entries until the task is aborted.
    pub fn spawn_purge_task(self: Arc<Self>, every: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            // First tick fires immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                self.purge_expired();
            }
        })
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        self.stats.lock().clone()
    }

    /// Clear all cached entries
    pub fn clear(&self) {
        self.entries.lock().clear();
        metrics::update_cache_entries(0);
        debug!("Cache cleared");
    }
}
