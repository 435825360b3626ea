// tmdb-companion - Caching TMDB API companion backend
// Author: kelexine (https://github.com/kelexine)

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod metrics;
pub mod server;
pub mod session;
pub mod tmdb;
pub mod utils;
