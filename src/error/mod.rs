// Error types for the TMDB companion backend
// Author: kelexine (https://github.com/kelexine)

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Config parsing error: {0}")]
    ConfigParsing(#[from] config::ConfigError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ProxyError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message exposed to API callers. Validation errors carry their text
    /// verbatim; everything else stays generic so internals do not leak.
    pub fn public_message(&self) -> String {
        match self {
            ProxyError::InvalidRequest(message) => message.clone(),
            ProxyError::Config(_) | ProxyError::ConfigParsing(_) => {
                "Server misconfiguration".to_string()
            }
            _ => "Internal server error".to_string(),
        }
    }
}

// Convert ProxyError to the `{"error": message}` shape shared with upstream errors
impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }

        let body = json!({ "error": self.public_message() });
        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ProxyError>;
