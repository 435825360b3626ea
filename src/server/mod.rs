//! Axum-based HTTP server for the TMDB companion backend.
//!
//! Routes proxy TMDB movie, TV, trending, search and authentication
//! endpoints. Read-only lookups go through the response cache; writes go
//! straight to TMDB.
//!
//! # Components
//!
//! - `handlers`: Implementation of individual API endpoints, grouped by resource.
//! - `middleware`: Request ID tracking and request metrics.
//! - `routes`: Application state and the router that ties everything together.
//!
//! Author: kelexine (<https://github.com/kelexine>)

mod handlers;
mod middleware;
mod routes;

pub use routes::{create_router, AppState};
