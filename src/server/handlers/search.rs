// Search endpoints
// Author: kelexine (https://github.com/kelexine)

use super::{cached_get, non_empty};
use crate::error::{ProxyError, Result};
use crate::server::AppState;
use crate::tmdb::{Params, UpstreamResponse};
use crate::utils::pagination::{clamp_page, CATALOG_MAX_PAGE};
use axum::extract::{Path, Query, State};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub query: Option<String>,
    pub page: Option<String>,
}

/// `GET /search/:kind?query=&page=` where `kind` is `movie`, `tv` or `multi`.
pub async fn search(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Query(search): Query<SearchQuery>,
) -> Result<UpstreamResponse> {
    if !matches!(kind.as_str(), "movie" | "tv" | "multi") {
        return Err(ProxyError::InvalidRequest(format!(
            "Unsupported search type: {}",
            kind
        )));
    }

    let Some(query) = non_empty(search.query) else {
        return Err(ProxyError::InvalidRequest("Missing query".to_string()));
    };

    let page = clamp_page(search.page.as_deref(), CATALOG_MAX_PAGE);
    let params = Params::from([
        ("query".to_string(), query.trim().to_string()),
        ("page".to_string(), page.to_string()),
    ]);

    Ok(cached_get(&state, format!("/search/{}", kind), params).await)
}
