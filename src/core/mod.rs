//! Core utilities shared by the service and the commands
//!
//! - `cache`: in-memory LRU prediction cache

pub mod cache;

pub use cache::{MemoryCache, PredictionCache, PredictionCacheKey};
