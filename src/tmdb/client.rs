// TMDB API client with error normalization
// Author: kelexine (https://github.com/kelexine)

use super::{ErrorBody, Params, UpstreamResponse};
use crate::config::{PerformanceConfig, TmdbConfig};
use crate::error::{ProxyError, Result};
use crate::metrics;
use crate::utils::logging::sanitize;
use axum::http::StatusCode;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, error, warn};

const JSON_CONTENT_TYPE: &str = "application/json;charset=utf-8";

/// Client for the TMDB v3 API.
///
/// Holds a single pooled HTTP client for keep-alive across calls. The
/// bearer token is optional at construction time so that a misconfigured
/// deployment still starts and answers every call with a 500.
pub struct TmdbClient {
    http_client: Client,
    base_url: String,
    token: Option<String>,
}

impl TmdbClient {
    /// Create a new TMDB client from configuration.
    pub fn new(config: &TmdbConfig, performance: &PerformanceConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(Duration::from_secs(config.timeout_seconds.min(10)))
            .pool_max_idle_per_host(performance.connection_pool_size)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Some(Duration::from_secs(60)))
            .use_rustls_tls()
            .build()
            .map_err(|e| ProxyError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        let token = config.token().map(str::to_string);
        if token.is_none() {
            warn!("TMDB read token is not configured; upstream calls will fail with 500");
        }

        Ok(Self {
            http_client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Whether a bearer token is available.
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get(&self, path: &str, params: Option<&Params>) -> UpstreamResponse {
        self.request(Method::GET, path, params, None).await
    }

    pub async fn post(
        &self,
        path: &str,
        body: Option<&Value>,
        params: Option<&Params>,
    ) -> UpstreamResponse {
        self.request(Method::POST, path, params, body).await
    }

    pub async fn delete(
        &self,
        path: &str,
        body: Option<&Value>,
        params: Option<&Params>,
    ) -> UpstreamResponse {
        self.request(Method::DELETE, path, params, body).await
    }

    /// Perform one upstream call and normalize the outcome.
    ///
    /// Never fails: missing credentials, upstream error statuses, transport
    /// failures and unreadable bodies all become an `{"error": ...}` payload
    /// with an appropriate status.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        params: Option<&Params>,
        body: Option<&Value>,
    ) -> UpstreamResponse {
        let Some(token) = self.token.as_deref() else {
            error!("TMDB read token is not configured");
            return UpstreamResponse::error(
                "Server misconfiguration",
                StatusCode::INTERNAL_SERVER_ERROR,
            );
        };

        let url = format!("{}{}", self.base_url, path);
        debug!("TMDB {} {}", method, path);

        let mut builder = self
            .http_client
            .request(method.clone(), &url)
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE);
        if let Some(params) = params {
            builder = builder.query(params);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let start = Instant::now();
        let result = builder.send().await;

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                let normalized = transport_failure(&e);
                error!("TMDB {} {} failed: {}", method, path, e);
                metrics::record_upstream_call(
                    method.as_str(),
                    normalized.status.as_u16(),
                    start.elapsed().as_secs_f64(),
                );
                return normalized;
            }
        };

        let status = response.status();
        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                error!("Failed to read TMDB response body for {}: {}", path, e);
                let normalized = transport_failure(&e);
                metrics::record_upstream_call(
                    method.as_str(),
                    normalized.status.as_u16(),
                    start.elapsed().as_secs_f64(),
                );
                return normalized;
            }
        };

        metrics::record_upstream_call(
            method.as_str(),
            status.as_u16(),
            start.elapsed().as_secs_f64(),
        );

        if status.as_u16() >= 400 {
            let normalized = normalize_error(status, &bytes);
            warn!(
                "TMDB {} {} returned HTTP {}: {}",
                method,
                path,
                status.as_u16(),
                sanitize(&String::from_utf8_lossy(&bytes))
            );
            return normalized;
        }

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(payload) => UpstreamResponse::new(payload, status),
            Err(_) if method == Method::DELETE => UpstreamResponse::empty_success(status),
            Err(e) => {
                error!("Failed to parse TMDB response for {}: {}", path, e);
                UpstreamResponse::error("Invalid upstream response", StatusCode::BAD_GATEWAY)
            }
        }
    }
}

/// Map an upstream error status and body to `{"error": message}`.
fn normalize_error(status: StatusCode, body: &[u8]) -> UpstreamResponse {
    let message = match serde_json::from_slice::<Value>(body) {
        Ok(payload) => serde_json::from_value::<ErrorBody>(payload)
            .ok()
            .and_then(|b| b.message())
            .unwrap_or_else(|| "TMDB error".to_string()),
        Err(_) => "Upstream TMDB error".to_string(),
    };
    UpstreamResponse::error(message, status)
}

fn transport_failure(e: &reqwest::Error) -> UpstreamResponse {
    if e.is_timeout() {
        UpstreamResponse::error("Upstream TMDB timeout", StatusCode::GATEWAY_TIMEOUT)
    } else {
        UpstreamResponse::error("Upstream TMDB unavailable", StatusCode::BAD_GATEWAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_error_uses_status_message() {
        let body = br#"{"status_code": 34, "status_message": "The resource you requested could not be found."}"#;
        let resp = normalize_error(StatusCode::NOT_FOUND, body);
        assert_eq!(resp.status, StatusCode::NOT_FOUND);
        assert_eq!(
            resp.payload,
            json!({ "error": "The resource you requested could not be found." })
        );
    }

    #[test]
    fn test_normalize_error_without_message_field() {
        let resp = normalize_error(StatusCode::UNAUTHORIZED, br#"{"success": false}"#);
        assert_eq!(resp.error_message(), Some("TMDB error"));
        assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_normalize_error_with_non_string_message() {
        let resp = normalize_error(StatusCode::BAD_REQUEST, br#"{"status_message": 34}"#);
        assert_eq!(resp.error_message(), Some("34"));

        let resp = normalize_error(StatusCode::BAD_REQUEST, br#"{"status_message": null}"#);
        assert_eq!(resp.error_message(), Some("TMDB error"));
    }

    #[test]
    fn test_normalize_error_with_non_json_body() {
        let resp = normalize_error(StatusCode::BAD_GATEWAY, b"<html>nginx</html>");
        assert_eq!(resp.error_message(), Some("Upstream TMDB error"));
        assert_eq!(resp.status, StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = TmdbConfig {
            api_base_url: "http://localhost:1234/3/".to_string(),
            read_token: Some("t".to_string()),
            ..Default::default()
        };
        let client = TmdbClient::new(&config, &PerformanceConfig::default()).unwrap();
        assert_eq!(client.base_url(), "http://localhost:1234/3");
        assert!(client.has_token());
    }
}
