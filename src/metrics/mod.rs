// Metrics module for Prometheus observability
// Author: kelexine (https://github.com/kelexine)

mod registry;

pub use registry::{
    gather_metrics,
    REQUESTS_TOTAL,
    REQUEST_DURATION,
    UPSTREAM_CALLS,
    UPSTREAM_DURATION,
    CACHE_OPERATIONS,
    CACHE_ENTRIES,
    SESSION_EVENTS,
};

/// Helper to record inbound request metrics
pub fn record_request(method: &str, endpoint: &str, status_code: u16, duration_secs: f64) {
    REQUESTS_TOTAL
        .with_label_values(&[method, endpoint, &status_code.to_string()])
        .inc();

    REQUEST_DURATION
        .with_label_values(&[method, endpoint])
        .observe(duration_secs);
}

/// Helper to record TMDB API call metrics
pub fn record_upstream_call(method: &str, status_code: u16, duration_secs: f64) {
    UPSTREAM_CALLS
        .with_label_values(&[method, &status_code.to_string()])
        .inc();

    UPSTREAM_DURATION
        .with_label_values(&[method])
        .observe(duration_secs);
}

/// Helpers to record response cache operations
pub fn record_cache_hit() {
    CACHE_OPERATIONS.with_label_values(&["hit"]).inc();
}

pub fn record_cache_miss() {
    CACHE_OPERATIONS.with_label_values(&["miss"]).inc();
}

pub fn record_cache_store() {
    CACHE_OPERATIONS.with_label_values(&["store"]).inc();
}

pub fn record_cache_eviction() {
    CACHE_OPERATIONS.with_label_values(&["eviction"]).inc();
}

pub fn record_cache_expired(count: usize) {
    CACHE_OPERATIONS.with_label_values(&["expired"]).inc_by(count as f64);
}

pub fn update_cache_entries(count: usize) {
    CACHE_ENTRIES.with_label_values(&["active"]).set(count as f64);
}

/// Helper to record session table events
pub fn record_session_event(kind: &str, event: &str) {
    SESSION_EVENTS.with_label_values(&[kind, event]).inc();
}
