//! AUR RPC client for aurs
//!
//! This crate provides HTTP client functionality for querying the AUR RPC
//! v5 endpoint with connection pooling, a typed response envelope, and
//! TTL-based result caching.

pub mod api;
pub mod cache;
pub mod client;

// Re-export main types
pub use api::RpcResponse;
pub use cache::{CacheEntry, CacheKey, CacheStats, SearchCache, DEFAULT_TTL};
pub use client::{RpcClient, RpcReply, DEFAULT_BASE_URL};

use aurs_core::error::AurError;

/// Result type for RPC operations
pub type RpcResult<T> = Result<T, AurError>;
