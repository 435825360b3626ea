// Trending endpoints (daily window)
// Author: kelexine (https://github.com/kelexine)

use super::{cached_get, PageQuery};
use crate::server::AppState;
use crate::tmdb::UpstreamResponse;
use crate::utils::pagination::CATALOG_MAX_PAGE;
use axum::extract::{Query, State};

pub async fn all(State(state): State<AppState>, Query(query): Query<PageQuery>) -> UpstreamResponse {
    trending(&state, "all", query).await
}

pub async fn movies(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> UpstreamResponse {
    trending(&state, "movie", query).await
}

pub async fn tv(State(state): State<AppState>, Query(query): Query<PageQuery>) -> UpstreamResponse {
    trending(&state, "tv", query).await
}

async fn trending(state: &AppState, media: &str, query: PageQuery) -> UpstreamResponse {
    cached_get(
        state,
        format!("/trending/{}/day", media),
        query.params(CATALOG_MAX_PAGE),
    )
    .await
}
