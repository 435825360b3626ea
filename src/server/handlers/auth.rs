// Authentication endpoints: guest sessions, login sessions, logout
// Author: kelexine (https://github.com/kelexine)

use super::{lenient_json, non_empty};
use crate::error::{ProxyError, Result};
use crate::server::AppState;
use crate::session::SessionKind;
use crate::tmdb::{GuestSession, RequestToken, UpstreamResponse, UserSession};
use axum::extract::State;
use axum::http::StatusCode;
use bytes::Bytes;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

#[derive(Debug, Default, Deserialize)]
struct LoginBody {
    username: Option<String>,
    password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct LogoutBody {
    session_id: Option<String>,
}

/// `GET /auth/guest-session`
pub async fn guest_session(State(state): State<AppState>) -> UpstreamResponse {
    let resp = state
        .client
        .get("/authentication/guest_session/new", None)
        .await;

    if resp.status == StatusCode::OK {
        match resp.parse::<GuestSession>() {
            Some(guest) => {
                state.sessions.record(SessionKind::Guest, &guest.guest_session_id);
            }
            None => warn!("Guest session response had no guest_session_id"),
        }
    }
    resp
}

/// `POST /auth/login-session` with `{"username", "password"}`.
///
/// Runs TMDB's three-step flow: request token, validate it with the
/// credentials, exchange it for a session id. The first failing step's
/// response is returned as-is.
pub async fn login_session(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<UpstreamResponse> {
    let body: LoginBody = lenient_json(&body);
    let (Some(username), Some(password)) = (non_empty(body.username), non_empty(body.password))
    else {
        return Err(ProxyError::InvalidRequest("Missing credentials".to_string()));
    };

    let token_resp = state.client.get("/authentication/token/new", None).await;
    if !token_resp.is_success() {
        return Ok(token_resp);
    }
    let Some(RequestToken { request_token }) = token_resp.parse() else {
        warn!("Token response had no request_token");
        return Ok(UpstreamResponse::error(
            "Invalid upstream response",
            StatusCode::BAD_GATEWAY,
        ));
    };

    let validate_body = json!({
        "username": username,
        "password": password,
        "request_token": request_token,
    });
    let validated = state
        .client
        .post(
            "/authentication/token/validate_with_login",
            Some(&validate_body),
            None,
        )
        .await;
    if !validated.is_success() {
        info!("TMDB rejected login credentials");
        return Ok(validated);
    }

    let session_resp = state
        .client
        .post(
            "/authentication/session/new",
            Some(&json!({ "request_token": request_token })),
            None,
        )
        .await;

    if session_resp.status == StatusCode::OK {
        match session_resp.parse::<UserSession>() {
            Some(session) => {
                state.sessions.record(SessionKind::User, &session.session_id);
            }
            None => warn!("Session response had no session_id"),
        }
    }
    Ok(session_resp)
}

/// `DELETE /auth/logout` with `{"session_id"}`.
pub async fn logout(State(state): State<AppState>, body: Bytes) -> Result<UpstreamResponse> {
    let body: LogoutBody = lenient_json(&body);
    let Some(session_id) = non_empty(body.session_id) else {
        return Err(ProxyError::InvalidRequest("Missing session_id".to_string()));
    };

    let payload = json!({ "session_id": session_id });
    let resp = state
        .client
        .delete("/authentication/session", Some(&payload), None)
        .await;

    if resp.is_success() {
        state.sessions.revoke(&session_id);
    }
    Ok(resp)
}
