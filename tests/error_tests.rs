// Error handling tests
// Author: kelexine (https://github.com/kelexine)

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use tmdb_companion::error::ProxyError;

#[test]
fn test_error_display_messages() {
    let errors = vec![
        ProxyError::Config("Missing section".to_string()),
        ProxyError::InvalidRequest("Bad request".to_string()),
        ProxyError::Internal("Boom".to_string()),
    ];

    for error in errors {
        let display = format!("{}", error);
        assert!(!display.is_empty(), "Error should have display message");
    }
}

#[test]
fn test_invalid_request_error() {
    let error = ProxyError::InvalidRequest("Missing session_id".to_string());
    assert!(format!("{}", error).contains("Missing session_id"));
    assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(error.public_message(), "Missing session_id");
}

#[test]
fn test_config_error_is_generic_to_callers() {
    let error = ProxyError::Config("tmdb.read_token unreadable".to_string());
    assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error.public_message(), "Server misconfiguration");
}

#[tokio::test]
async fn test_validation_error_response_shape() {
    let response = ProxyError::InvalidRequest("Missing value or session_id".to_string())
        .into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, serde_json::json!({ "error": "Missing value or session_id" }));
}

#[tokio::test]
async fn test_internal_error_hides_details() {
    let response = ProxyError::Internal("socket exploded".to_string()).into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(!text.contains("socket exploded"));
}
