//! Utility functions and helpers for the TMDB companion backend.
//!
//! # Submodules
//!
//! - `logging`: Tracing and logging initialization with token redaction.
//! - `pagination`: Page-number clamping applied before upstream calls and cache keys.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod logging;
pub mod pagination;
