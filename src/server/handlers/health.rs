// Health and observability endpoints
// Author: kelexine (https://github.com/kelexine)

use crate::metrics::gather_metrics;
use crate::server::AppState;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub checks: HashMap<String, HealthCheck>,
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Ok,
    Degraded,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheck {
    pub status: String,
    pub message: String,
}

/// Liveness plus a summary of credentials, cache and session table.
/// Always 200; a missing token only degrades the status.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let mut checks = HashMap::new();
    let mut overall_status = HealthStatus::Ok;

    let credentials_check = if state.client.has_token() {
        HealthCheck {
            status: "ok".to_string(),
            message: format!("API base: {}", state.client.base_url()),
        }
    } else {
        overall_status = HealthStatus::Degraded;
        HealthCheck {
            status: "error".to_string(),
            message: "TMDB read token is not configured".to_string(),
        }
    };
    checks.insert("tmdb_credentials".to_string(), credentials_check);

    let stats = state.cache.stats();
    checks.insert(
        "response_cache".to_string(),
        HealthCheck {
            status: if state.cache.config().enabled { "ok" } else { "disabled" }.to_string(),
            message: format!(
                "{} entries, {} hits, {} misses",
                state.cache.len(),
                stats.hits,
                stats.misses
            ),
        },
    );

    checks.insert(
        "sessions".to_string(),
        HealthCheck {
            status: "ok".to_string(),
            message: format!("{} active sessions", state.sessions.active_count()),
        },
    );

    Json(HealthResponse {
        status: overall_status,
        checks,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Which credentials were picked up from configuration. Never echoes values.
pub async fn env_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "TMDB_READ_TOKEN_loaded": state.config.tmdb.token().is_some(),
        "TMDB_API_KEY_loaded": state.config.tmdb.api_key.is_some(),
    }))
}

/// Prometheus text exposition
pub async fn metrics_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        gather_metrics(),
    )
}
