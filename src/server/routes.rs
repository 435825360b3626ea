// HTTP routes configuration
// Author: kelexine (https://github.com/kelexine)

use super::handlers::{auth, health, movies, search, trending, tv};
use super::middleware::{request_id_layers, track_metrics};
use crate::cache::{CacheConfig, ResponseCache};
use crate::config::AppConfig;
use crate::error::Result;
use crate::session::SessionStore;
use crate::tmdb::TmdbClient;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Shared, explicitly constructed dependencies handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub client: Arc<TmdbClient>,
    pub cache: Arc<ResponseCache>,
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    /// Build the client, cache and session table from configuration.
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = TmdbClient::new(&config.tmdb, &config.performance)?;
        let cache = ResponseCache::new(CacheConfig::from(&config.cache));

        Ok(Self {
            config: Arc::new(config),
            client: Arc::new(client),
            cache: Arc::new(cache),
            sessions: Arc::new(SessionStore::new()),
        })
    }
}

pub fn create_router(state: AppState) -> Router {
    let (set_request_id, propagate_request_id) = request_id_layers();
    let enable_compression = state.config.performance.enable_compression;

    let app = Router::new()
        .route("/health", get(health::health_handler))
        .route("/health/env", get(health::env_handler))
        .route("/metrics", get(health::metrics_handler))
        .route("/auth/guest-session", get(auth::guest_session))
        .route("/auth/login-session", post(auth::login_session))
        .route("/auth/logout", axum::routing::delete(auth::logout))
        .route("/movies/:movie_id", get(movies::details))
        .route("/movies/:movie_id/recommendations", get(movies::recommendations))
        .route("/movies/:movie_id/reviews", get(movies::reviews))
        .route(
            "/movies/:movie_id/rating",
            post(movies::add_rating).delete(movies::delete_rating),
        )
        .route("/tv/:tv_id", get(tv::details))
        .route("/tv/:tv_id/recommendations", get(tv::recommendations))
        .route("/tv/:tv_id/reviews", get(tv::reviews))
        .route("/tv/:tv_id/keywords", get(tv::keywords))
        .route("/tv/:tv_id/similar", get(tv::similar))
        .route("/tv/:tv_id/rating", post(tv::add_rating).delete(tv::delete_rating))
        .route("/trending/all", get(trending::all))
        .route("/trending/movies", get(trending::movies))
        .route("/trending/tv", get(trending::tv))
        .route("/search/:kind", get(search::search))
        .route_layer(middleware::from_fn(track_metrics))
        .layer(RequestBodyLimitLayer::new(1024 * 1024))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id)
        .layer(set_request_id);

    let app = if enable_compression {
        app.layer(CompressionLayer::new())
    } else {
        app
    };

    app.with_state(state)
}
