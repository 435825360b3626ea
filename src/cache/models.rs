//! Cache configuration, key and statistics models.

// Author: kelexine (https://github.com/kelexine)

use crate::config::CacheSettings;
use crate::tmdb::{Params, UpstreamResponse};
use std::fmt;
use std::time::{Duration, Instant};

/// Configuration for the response cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Whether caching is enabled.
    pub enabled: bool,
    /// How long a stored response stays servable.
    pub ttl: Duration,
    /// Maximum number of entries before the least recently used is evicted.
    pub max_entries: usize,
}

impl Default for CacheConfig {
    /// Provides default values for cache configuration.
    ///
    /// - `enabled`: true
    /// - `ttl`: 300 seconds
    /// - `max_entries`: 1024
    fn default() -> Self {
        Self {
            enabled: true,
            ttl: Duration::from_secs(300),
            max_entries: 1024,
        }
    }
}

impl From<&CacheSettings> for CacheConfig {
    fn from(settings: &CacheSettings) -> Self {
        Self {
            enabled: settings.enabled,
            ttl: settings.ttl(),
            max_entries: settings.max_entries,
        }
    }
}

/// Identity of a cached response: the route plus its sorted query parameters.
///
/// Page parameters must already be clamped by the caller, otherwise every
/// out-of-range page would mint a fresh key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    route: String,
    params: Params,
}

impl CacheKey {
    pub fn new<I, K, V>(route: impl Into<String>, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToString,
    {
        Self {
            route: route.into(),
            params: params
                .into_iter()
                .map(|(k, v)| (k.into(), v.to_string()))
                .collect(),
        }
    }

    /// Key for a route without query parameters.
    pub fn route(route: impl Into<String>) -> Self {
        Self {
            route: route.into(),
            params: Params::new(),
        }
    }

    pub fn path(&self) -> &str {
        &self.route
    }

    pub fn params(&self) -> &Params {
        &self.params
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.route)?;
        for (i, (k, v)) in self.params.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{}{}={}", sep, urlencoding::encode(k), urlencoding::encode(v))?;
        }
        Ok(())
    }
}

/// A stored response and the instant it stops being servable.
#[derive(Debug, Clone)]
pub(crate) struct CacheEntry {
    pub response: UpstreamResponse,
    /// `None` when `now + ttl` is past what `Instant` can represent.
    pub expires_at: Option<Instant>,
}

impl CacheEntry {
    pub fn new(response: UpstreamResponse, now: Instant, ttl: Duration) -> Self {
        Self {
            response,
            expires_at: now.checked_add(ttl),
        }
    }

    pub fn is_live(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |expires_at| now < expires_at)
    }
}

/// Statistics for cache operations.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CacheStats {
    /// Number of lookups served from the cache.
    pub hits: u64,
    /// Number of lookups that found nothing live.
    pub misses: u64,
    /// Number of responses stored.
    pub stores: u64,
    /// Entries dropped to stay under `max_entries`.
    pub evictions: u64,
    /// Entries dropped because their TTL ran out.
    pub expired: u64,
}
