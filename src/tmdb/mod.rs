//! Upstream TMDB API client and the normalized response shape.
//!
//! Every upstream call resolves to an [`UpstreamResponse`]: the payload is
//! either the verbatim TMDB JSON, a synthetic `{"success": true}` for empty
//! deletion bodies, or a single-key `{"error": message}` object. The status
//! is passed through from TMDB unless the failure was produced locally.
//!
//! Author: kelexine (<https://github.com/kelexine>)

mod client;

pub use client::TmdbClient;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// Query parameters, kept sorted so equal sets compare and hash equal.
pub type Params = BTreeMap<String, String>;

/// Normalized `(payload, status)` pair returned by every upstream call.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamResponse {
    pub payload: Value,
    pub status: StatusCode,
}

impl UpstreamResponse {
    pub fn new(payload: Value, status: StatusCode) -> Self {
        Self { payload, status }
    }

    /// Single-key `{"error": message}` payload.
    pub fn error(message: impl Into<String>, status: StatusCode) -> Self {
        Self {
            payload: json!({ "error": message.into() }),
            status,
        }
    }

    /// Synthetic payload for successful calls that return no body.
    pub fn empty_success(status: StatusCode) -> Self {
        Self {
            payload: json!({ "success": true }),
            status,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.as_u16() < 400
    }

    /// Deserialize the payload into one of the typed views below.
    pub fn parse<T: DeserializeOwned>(&self) -> Option<T> {
        serde_json::from_value(self.payload.clone()).ok()
    }

    /// Error message carried by an `{"error": ...}` payload.
    pub fn error_message(&self) -> Option<&str> {
        self.payload.get("error").and_then(Value::as_str)
    }
}

impl IntoResponse for UpstreamResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.payload)).into_response()
    }
}

/// TMDB error body. Only `status_message` is read.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub status_message: Option<Value>,
}

impl ErrorBody {
    /// `status_message` as text. Non-string values are rendered as JSON;
    /// `null` counts as absent.
    pub fn message(&self) -> Option<String> {
        match self.status_message.as_ref()? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// Result of `GET /authentication/guest_session/new`.
#[derive(Debug, Deserialize)]
pub struct GuestSession {
    pub guest_session_id: String,
}

/// Result of `GET /authentication/token/new`.
#[derive(Debug, Deserialize)]
pub struct RequestToken {
    pub request_token: String,
}

/// Result of `POST /authentication/session/new`.
#[derive(Debug, Deserialize)]
pub struct UserSession {
    pub session_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_payload_shape() {
        let resp = UpstreamResponse::error("Invalid id", StatusCode::NOT_FOUND);
        assert_eq!(resp.payload, json!({ "error": "Invalid id" }));
        assert_eq!(resp.error_message(), Some("Invalid id"));
        assert!(!resp.is_success());
    }

    #[test]
    fn test_typed_views() {
        let resp = UpstreamResponse::new(
            json!({ "success": true, "guest_session_id": "g-123", "expires_at": "x" }),
            StatusCode::OK,
        );
        let guest: GuestSession = resp.parse().unwrap();
        assert_eq!(guest.guest_session_id, "g-123");
        assert!(resp.parse::<RequestToken>().is_none());
    }

    #[test]
    fn test_redirect_counts_as_success() {
        let resp = UpstreamResponse::new(json!({}), StatusCode::NOT_MODIFIED);
        assert!(resp.is_success());
    }
}
