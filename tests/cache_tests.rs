// Response cache tests - testing only public APIs
// Author: kelexine (https://github.com/kelexine)

use axum::http::StatusCode;
use proptest::prelude::*;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tmdb_companion::cache::{CacheConfig, CacheKey, ResponseCache};
use tmdb_companion::tmdb::UpstreamResponse;

fn counting_producer(
    calls: &Arc<AtomicUsize>,
    response: UpstreamResponse,
) -> impl FnOnce() -> std::future::Ready<UpstreamResponse> {
    let calls = Arc::clone(calls);
    move || {
        calls.fetch_add(1, Ordering::SeqCst);
        std::future::ready(response)
    }
}

#[test]
fn test_cache_stats_initialization() {
    let cache = ResponseCache::new(CacheConfig::default());
    let stats = cache.stats();

    assert_eq!(stats.hits, 0);
    assert_eq!(stats.misses, 0);
    assert_eq!(stats.stores, 0);
}

#[test]
fn test_cache_config_defaults() {
    let config = CacheConfig::default();

    assert_eq!(config.ttl, Duration::from_secs(300));
    assert_eq!(config.max_entries, 1024);
    assert!(config.enabled);
}

#[tokio::test]
async fn test_second_call_within_ttl_is_served_from_cache() {
    let cache = ResponseCache::new(CacheConfig::default());
    let calls = Arc::new(AtomicUsize::new(0));
    let key = CacheKey::new("/movie/603/recommendations", [("page", 2)]);
    let fresh = UpstreamResponse::new(json!({ "page": 2, "results": [] }), StatusCode::OK);

    let first = cache
        .get_or_fetch(key.clone(), counting_producer(&calls, fresh.clone()))
        .await;
    let second = cache
        .get_or_fetch(key.clone(), counting_producer(&calls, fresh.clone()))
        .await;

    assert_eq!(first, second);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(cache.stats().hits, 1);
}

#[tokio::test]
async fn test_call_after_ttl_reaches_upstream_again() {
    let cache = ResponseCache::new(CacheConfig {
        ttl: Duration::from_millis(50),
        ..Default::default()
    });
    let calls = Arc::new(AtomicUsize::new(0));
    let key = CacheKey::route("/trending/tv/day");
    let fresh = UpstreamResponse::new(json!({ "results": [] }), StatusCode::OK);

    cache
        .get_or_fetch(key.clone(), counting_producer(&calls, fresh.clone()))
        .await;
    tokio::time::sleep(Duration::from_millis(120)).await;
    cache
        .get_or_fetch(key.clone(), counting_producer(&calls, fresh.clone()))
        .await;

    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_error_responses_are_not_cached() {
    let cache = ResponseCache::new(CacheConfig::default());
    let calls = Arc::new(AtomicUsize::new(0));
    let key = CacheKey::route("/movie/0");
    let not_found = UpstreamResponse::error("Invalid id", StatusCode::NOT_FOUND);

    for _ in 0..2 {
        let resp = cache
            .get_or_fetch(key.clone(), counting_producer(&calls, not_found.clone()))
            .await;
        assert_eq!(resp.status, StatusCode::NOT_FOUND);
    }

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert!(cache.is_empty());
}

#[tokio::test]
async fn test_disabled_cache_always_calls_producer() {
    let cache = ResponseCache::new(CacheConfig {
        enabled: false,
        ..Default::default()
    });
    let calls = Arc::new(AtomicUsize::new(0));
    let key = CacheKey::route("/tv/1399");
    let fresh = UpstreamResponse::new(json!({ "id": 1399 }), StatusCode::OK);

    for _ in 0..3 {
        cache
            .get_or_fetch(key.clone(), counting_producer(&calls, fresh.clone()))
            .await;
    }

    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert!(cache.is_empty());
}

#[tokio::test]
async fn test_purge_task_drops_expired_entries() {
    let cache = Arc::new(ResponseCache::new(CacheConfig {
        ttl: Duration::from_millis(10),
        ..Default::default()
    }));
    cache.insert(
        CacheKey::route("/movie/11"),
        UpstreamResponse::new(json!({ "id": 11 }), StatusCode::OK),
    );

    let task = Arc::clone(&cache).spawn_purge_task(Duration::from_millis(20));
    tokio::time::sleep(Duration::from_millis(100)).await;
    task.abort();

    assert!(cache.is_empty());
    assert_eq!(cache.stats().expired, 1);
}

#[test]
fn test_cache_key_display() {
    let key = CacheKey::new("/search/movie", [("query", "the matrix"), ("page", "1")]);
    assert_eq!(key.to_string(), "/search/movie?page=1&query=the%20matrix");
    assert_eq!(CacheKey::route("/movie/603").to_string(), "/movie/603");
}

proptest! {
    #[test]
    fn prop_cache_key_ignores_param_order(
        params in proptest::collection::btree_map("[a-z_]{1,8}", "[a-z0-9]{0,8}", 0..6)
    ) {
        let forward: Vec<(String, String)> = params.clone().into_iter().collect();
        let mut reversed = forward.clone();
        reversed.reverse();

        prop_assert_eq!(
            CacheKey::new("/route", forward),
            CacheKey::new("/route", reversed)
        );
    }

    #[test]
    fn prop_distinct_routes_never_collide(a in "/[a-z]{1,10}", b in "/[a-z]{1,10}") {
        prop_assume!(a != b);
        prop_assert_ne!(CacheKey::route(a), CacheKey::route(b));
    }
}
