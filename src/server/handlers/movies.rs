// Movie endpoints
// Author: kelexine (https://github.com/kelexine)

use super::{cached_get, remove_rating, submit_rating, MediaId, PageQuery};
use crate::error::Result;
use crate::server::AppState;
use crate::tmdb::{Params, UpstreamResponse};
use crate::utils::pagination::LISTING_MAX_PAGE;
use axum::extract::{Query, State};
use bytes::Bytes;

/// `GET /movies/:movie_id`
pub async fn details(State(state): State<AppState>, MediaId(movie_id): MediaId) -> UpstreamResponse {
    cached_get(&state, format!("/movie/{}", movie_id), Params::new()).await
}

/// `GET /movies/:movie_id/recommendations?page=`
pub async fn recommendations(
    State(state): State<AppState>,
    MediaId(movie_id): MediaId,
    Query(query): Query<PageQuery>,
) -> UpstreamResponse {
    cached_get(
        &state,
        format!("/movie/{}/recommendations", movie_id),
        query.params(LISTING_MAX_PAGE),
    )
    .await
}

/// `GET /movies/:movie_id/reviews?page=`
pub async fn reviews(
    State(state): State<AppState>,
    MediaId(movie_id): MediaId,
    Query(query): Query<PageQuery>,
) -> UpstreamResponse {
    cached_get(
        &state,
        format!("/movie/{}/reviews", movie_id),
        query.params(LISTING_MAX_PAGE),
    )
    .await
}

/// `POST /movies/:movie_id/rating` with `{"value", "session_id"}`.
///
/// Does not invalidate the cached details for the movie.
pub async fn add_rating(
    State(state): State<AppState>,
    MediaId(movie_id): MediaId,
    body: Bytes,
) -> Result<UpstreamResponse> {
    submit_rating(&state, "movie", movie_id, &body).await
}

/// `DELETE /movies/:movie_id/rating` with `{"session_id"}`.
pub async fn delete_rating(
    State(state): State<AppState>,
    MediaId(movie_id): MediaId,
    body: Bytes,
) -> Result<UpstreamResponse> {
    remove_rating(&state, "movie", movie_id, &body).await
}
