//! Tag-invalidated result cache.
//!
//! T030: Implement StatsCache with TTL and tag invalidation
//!
//! Sits strictly in front of the pure statistics engine, never inside it.
//! Keys are a query name plus a canonical parameter string; values are JSON
//! payloads stamped with an expiry and a tag. Writers invalidate by tag (or
//! wholesale) after mutating the underlying entries.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Default time-to-live for cached results (24 hours).
pub const DEFAULT_TTL_SECONDS: i64 = 24 * 60 * 60;

/// Invalidation groups for cached queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheTag {
    /// Full entry listings.
    AllEntries,
    /// Yearly totals.
    YearlyTotals,
    /// Monthly totals.
    MonthlyTotals,
    /// Daily totals.
    DailyTotals,
    /// Name-based queries (rankings, per-name listings).
    Names,
    /// Scalar stats (streak, gap, fastest, youngest, overview).
    Stats,
}

/// One cached payload.
struct CachedEntry {
    payload: String,
    tag: CacheTag,
    expires_at: DateTime<Utc>,
}

/// In-memory cache for statistics query results.
pub struct StatsCache {
    entries: HashMap<String, CachedEntry>,
    ttl: Duration,
}

impl StatsCache {
    /// Create a cache with the default 24-hour TTL.
    pub fn new() -> Self {
        Self::with_ttl_seconds(DEFAULT_TTL_SECONDS)
    }

    /// Create a cache with a custom TTL.
    pub fn with_ttl_seconds(seconds: i64) -> Self {
        Self {
            entries: HashMap::new(),
            ttl: Duration::seconds(seconds),
        }
    }

    /// Build a cache key from a query name and its parameters.
    pub fn key(query: &str, params: &[&str]) -> String {
        if params.is_empty() {
            return query.to_string();
        }
        format!("{}:{}", query, params.join(":"))
    }

    /// Look up a fresh cached value. Expired entries count as misses.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        let entry = match self.entries.get(key) {
            Some(entry) => entry,
            None => {
                tracing::debug!(key, "cache miss");
                return Ok(None);
            }
        };

        if Utc::now() > entry.expires_at {
            tracing::debug!(key, "cache entry expired");
            return Ok(None);
        }

        tracing::debug!(key, "cache hit");
        let value = serde_json::from_str(&entry.payload)?;
        Ok(Some(value))
    }

    /// Store a value under a key and tag, stamping the TTL.
    pub fn put<T: Serialize>(
        &mut self,
        key: &str,
        tag: CacheTag,
        value: &T,
    ) -> Result<(), CacheError> {
        let payload = serde_json::to_string(value)?;
        self.entries.insert(
            key.to_string(),
            CachedEntry {
                payload,
                tag,
                expires_at: Utc::now() + self.ttl,
            },
        );
        Ok(())
    }

    /// Drop every entry carrying the given tag.
    pub fn invalidate(&mut self, tag: CacheTag) {
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.tag != tag);
        tracing::debug!(?tag, dropped = before - self.entries.len(), "invalidated tag");
    }

    /// Drop everything. Used after writes that touch multiple views.
    pub fn invalidate_all(&mut self) {
        self.entries.clear();
    }

    /// Remove expired entries. Housekeeping; correctness never depends on it.
    pub fn purge_expired(&mut self) {
        let now = Utc::now();
        self.entries.retain(|_, entry| entry.expires_at >= now);
    }

    /// Number of stored entries, including any not yet purged after expiry.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for StatsCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors arising from cache payload serialization.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Payload could not be serialized or deserialized.
    #[error("Cache serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
