// TV series endpoints
// Author: kelexine (https://github.com/kelexine)

use super::{cached_get, remove_rating, submit_rating, MediaId, PageQuery};
use crate::error::Result;
use crate::server::AppState;
use crate::tmdb::{Params, UpstreamResponse};
use crate::utils::pagination::LISTING_MAX_PAGE;
use axum::extract::{Query, State};
use bytes::Bytes;

pub async fn details(State(state): State<AppState>, MediaId(tv_id): MediaId) -> UpstreamResponse {
    cached_get(&state, format!("/tv/{}", tv_id), Params::new()).await
}

pub async fn recommendations(
    State(state): State<AppState>,
    MediaId(tv_id): MediaId,
    Query(query): Query<PageQuery>,
) -> UpstreamResponse {
    cached_get(
        &state,
        format!("/tv/{}/recommendations", tv_id),
        query.params(LISTING_MAX_PAGE),
    )
    .await
}

pub async fn reviews(
    State(state): State<AppState>,
    MediaId(tv_id): MediaId,
    Query(query): Query<PageQuery>,
) -> UpstreamResponse {
    cached_get(
        &state,
        format!("/tv/{}/reviews", tv_id),
        query.params(LISTING_MAX_PAGE),
    )
    .await
}

pub async fn keywords(State(state): State<AppState>, MediaId(tv_id): MediaId) -> UpstreamResponse {
    cached_get(&state, format!("/tv/{}/keywords", tv_id), Params::new()).await
}

pub async fn similar(
    State(state): State<AppState>,
    MediaId(tv_id): MediaId,
    Query(query): Query<PageQuery>,
) -> UpstreamResponse {
    cached_get(
        &state,
        format!("/tv/{}/similar", tv_id),
        query.params(LISTING_MAX_PAGE),
    )
    .await
}

pub async fn add_rating(
    State(state): State<AppState>,
    MediaId(tv_id): MediaId,
    body: Bytes,
) -> Result<UpstreamResponse> {
    submit_rating(&state, "tv", tv_id, &body).await
}

pub async fn delete_rating(
    State(state): State<AppState>,
    MediaId(tv_id): MediaId,
    body: Bytes,
) -> Result<UpstreamResponse> {
    remove_rating(&state, "tv", tv_id, &body).await
}
