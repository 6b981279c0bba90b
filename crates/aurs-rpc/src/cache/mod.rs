//! Result caching with TTL support.
//!
//! One cache entry per lookup key, valid for [`DEFAULT_TTL`] after
//! creation. There is no background expiry: a stale entry is removed the
//! next time its key is looked up, and overwritten when the same key is
//! fetched again.

use std::fmt;
use std::time::{Duration, SystemTime};

use aurs_core::types::{Package, SearchField, SearchMode};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

/// How long a cached result set stays fresh
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// Identity of one cacheable query.
///
/// The key carries everything needed to construct the remote request, so
/// it doubles as the query descriptor handed to the client.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Search { term: String, field: SearchField },
    Info { name: String },
}

impl CacheKey {
    /// Key for a search-mode lookup
    pub fn search(term: impl Into<String>, field: SearchField) -> Self {
        CacheKey::Search {
            term: term.into(),
            field,
        }
    }

    /// Key for an info-mode lookup
    pub fn info(name: impl Into<String>) -> Self {
        CacheKey::Info { name: name.into() }
    }

    /// The query shape this key describes
    pub fn mode(&self) -> SearchMode {
        match self {
            CacheKey::Search { .. } => SearchMode::Search,
            CacheKey::Info { .. } => SearchMode::Info,
        }
    }

    /// The term or package name, for log messages
    pub fn target(&self) -> &str {
        match self {
            CacheKey::Search { term, .. } => term,
            CacheKey::Info { name } => name,
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKey::Search { term, field } => write!(f, "{term}|{field}"),
            CacheKey::Info { name } => write!(f, "info|{name}"),
        }
    }
}

/// Cache entry with TTL
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Cached result set, in server-returned order
    pub results: Vec<Package>,
    /// When the entry was stored
    pub stored_at: SystemTime,
    /// Time-to-live duration
    pub ttl: Duration,
}

impl CacheEntry {
    /// Create a new cache entry with the default TTL
    pub fn new(results: Vec<Package>) -> Self {
        Self::with_ttl(results, DEFAULT_TTL)
    }

    /// Create a cache entry with a custom TTL
    pub fn with_ttl(results: Vec<Package>, ttl: Duration) -> Self {
        Self {
            results,
            stored_at: SystemTime::now(),
            ttl,
        }
    }

    /// Check if the entry is still fresh
    pub fn is_fresh(&self) -> bool {
        match self.stored_at.elapsed() {
            Ok(elapsed) => elapsed < self.ttl,
            Err(_) => false, // Clock went backwards, consider stale
        }
    }

    /// Get the age of the entry
    pub fn age(&self) -> Option<Duration> {
        self.stored_at.elapsed().ok()
    }
}

/// In-memory result cache with TTL.
///
/// Map accesses are serialized internally; no lock is ever held across a
/// network call, so a slow fetch never blocks lookups for other keys.
#[derive(Debug, Default)]
pub struct SearchCache {
    cache: DashMap<CacheKey, CacheEntry>,
}

impl SearchCache {
    /// Create a new empty cache
    pub fn new() -> Self {
        Self {
            cache: DashMap::new(),
        }
    }

    /// Get the cached result set if fresh
    pub fn get(&self, key: &CacheKey) -> Option<Vec<Package>> {
        let entry = self.cache.get(key)?;
        if entry.is_fresh() {
            Some(entry.results.clone())
        } else {
            // Guard must be released before removing from the same shard
            drop(entry);
            self.cache.remove(key);
            None
        }
    }

    /// Store a result set with the default TTL, replacing any prior entry
    pub fn insert(&self, key: CacheKey, results: Vec<Package>) {
        self.cache.insert(key, CacheEntry::new(results));
    }

    /// Store a result set with a custom TTL
    pub fn insert_with_ttl(&self, key: CacheKey, results: Vec<Package>, ttl: Duration) {
        self.cache.insert(key, CacheEntry::with_ttl(results, ttl));
    }

    /// Check if a key is cached and fresh
    pub fn contains_fresh(&self, key: &CacheKey) -> bool {
        self.cache
            .get(key)
            .map(|entry| entry.is_fresh())
            .unwrap_or(false)
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        let mut fresh_count = 0;
        let mut stale_count = 0;

        for entry in self.cache.iter() {
            if entry.is_fresh() {
                fresh_count += 1;
            } else {
                stale_count += 1;
            }
        }

        CacheStats {
            total_entries: self.cache.len(),
            fresh_entries: fresh_count,
            stale_entries: stale_count,
        }
    }

    /// Clear all cached entries
    pub fn clear(&self) {
        self.cache.clear();
    }

    /// Remove stale entries
    pub fn cleanup(&self) -> usize {
        let mut removed = 0;
        self.cache.retain(|_, entry| {
            if entry.is_fresh() {
                true
            } else {
                removed += 1;
                false
            }
        });
        removed
    }
}

/// Cache statistics
#[derive(Debug, Clone)]
pub struct CacheStats {
    /// Total number of entries
    pub total_entries: usize,
    /// Number of fresh entries
    pub fresh_entries: usize,
    /// Number of stale entries
    pub stale_entries: usize,
}
