// HTTP request handlers
// Author: kelexine (https://github.com/kelexine)

pub mod auth;
pub mod health;
pub mod movies;
pub mod search;
pub mod trending;
pub mod tv;

use super::routes::AppState;
use crate::cache::CacheKey;
use crate::error::{ProxyError, Result};
use crate::session::SessionKind;
use crate::tmdb::{Params, UpstreamResponse};
use crate::utils::pagination::clamp_page;
use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

/// Numeric movie or TV id from the single path segment.
///
/// Rejections use the `{"error": ...}` shape instead of axum's plain-text body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaId(pub u64);

#[axum::async_trait]
impl<S: Send + Sync> FromRequestParts<S> for MediaId {
    type Rejection = ProxyError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let Path(id) = Path::<u64>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                debug!("Rejected path: {}", e.body_text());
                ProxyError::InvalidRequest("Invalid id".to_string())
            })?;
        Ok(MediaId(id))
    }
}

/// `?page=` query, clamped per route before use.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

impl PageQuery {
    pub fn params(&self, max_page: u32) -> Params {
        let page = clamp_page(self.page.as_deref(), max_page);
        Params::from([("page".to_string(), page.to_string())])
    }
}

/// Body of rating submissions and deletions.
#[derive(Debug, Default, Deserialize)]
struct RatingBody {
    value: Option<Value>,
    session_id: Option<String>,
}

/// Parse a JSON body, treating an empty or malformed body as `{}`.
pub(crate) fn lenient_json<T: DeserializeOwned + Default>(body: &Bytes) -> T {
    if body.is_empty() {
        return T::default();
    }
    serde_json::from_slice(body).unwrap_or_else(|e| {
        debug!("Ignoring unreadable request body: {}", e);
        T::default()
    })
}

pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Serve a read-only TMDB path through the response cache.
///
/// The key is the upstream path plus the already-clamped params.
pub(crate) async fn cached_get(state: &AppState, path: String, params: Params) -> UpstreamResponse {
    let key = CacheKey::new(path.clone(), params.clone());
    let client = Arc::clone(&state.client);

    state
        .cache
        .get_or_fetch(key, || async move {
            let query = (!params.is_empty()).then_some(&params);
            client.get(&path, query).await
        })
        .await
}

/// Session query parameter for a rating call. Guest sessions this instance
/// brokered use TMDB's `guest_session_id`; everything else is `session_id`.
fn session_params(state: &AppState, session_id: String) -> Params {
    let name = match state.sessions.find(&session_id).map(|r| r.kind) {
        Some(SessionKind::Guest) => "guest_session_id",
        _ => "session_id",
    };
    Params::from([(name.to_string(), session_id)])
}

/// `POST /{media}/{id}/rating` shared by movies and TV.
pub(crate) async fn submit_rating(
    state: &AppState,
    media: &str,
    id: u64,
    body: &Bytes,
) -> Result<UpstreamResponse> {
    let body: RatingBody = lenient_json(body);
    let (Some(value), Some(session_id)) = (
        body.value.filter(|v| !v.is_null()),
        non_empty(body.session_id),
    ) else {
        return Err(ProxyError::InvalidRequest(
            "Missing value or session_id".to_string(),
        ));
    };

    let params = session_params(state, session_id);
    let payload = json!({ "value": value });
    Ok(state
        .client
        .post(&format!("/{}/{}/rating", media, id), Some(&payload), Some(&params))
        .await)
}

/// `DELETE /{media}/{id}/rating` shared by movies and TV.
pub(crate) async fn remove_rating(
    state: &AppState,
    media: &str,
    id: u64,
    body: &Bytes,
) -> Result<UpstreamResponse> {
    let body: RatingBody = lenient_json(body);
    let Some(session_id) = non_empty(body.session_id) else {
        return Err(ProxyError::InvalidRequest("Missing session_id".to_string()));
    };

    let params = session_params(state, session_id);
    Ok(state
        .client
        .delete(&format!("/{}/{}/rating", media, id), None, Some(&params))
        .await)
}
