//! Concurrent search engine for the aurs AUR client
//!
//! This crate fans one lookup worker out per search term, merges every
//! worker's results into a single output stream, and short-circuits repeat
//! lookups through the shared TTL cache in `aurs-rpc`.
//!
//! Failure of one lookup never affects its siblings: a failed worker
//! simply contributes zero results.

pub mod engine;
pub mod worker;

// Re-export main types
pub use engine::{SearchEngine, DEFAULT_MAX_IN_FLIGHT, DEFAULT_REQUEST_TIMEOUT};
pub use worker::WorkerOutcome;
