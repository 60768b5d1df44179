//! Response cache port
//!
//! The cache is a plain keyed store owned by one session. It holds
//! `CacheEntry` values and never evicts: freshness is decided by the reader
//! at read time from `fetched_at` and the TTL of the lookup kind.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use domain::{CacheKey, ForecastBundle, WeatherSnapshot};
use serde::{Deserialize, Serialize};

/// Payload stored under a cache key
#[derive(Debug, Clone, PartialEq)]
pub enum CachedPayload {
    /// Current conditions (city or coordinate lookups)
    Current(Arc<WeatherSnapshot>),
    /// Forecast bundle
    Forecast(Arc<ForecastBundle>),
}

/// A cached response and the time it was obtained
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    /// The response payload, shared with callers
    pub payload: CachedPayload,
    /// When the successful response arrived
    pub fetched_at: DateTime<Utc>,
    /// When the request that produced it was issued
    pub requested_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Time elapsed since the response arrived (zero if the clock went backwards)
    #[must_use]
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        (now - self.fetched_at).to_std().unwrap_or_default()
    }

    /// Fresh for `[fetched_at, fetched_at + ttl)`
    #[must_use]
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        self.age(now) < ttl
    }
}

/// Result of a write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// Entry inserted or replaced
    Stored,
    /// Entry dropped because a newer request already wrote this key
    Discarded,
}

/// How concurrent writes to the same key are resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteOrdering {
    /// Whichever call completes last overwrites the entry
    #[default]
    LastWriteWins,
    /// A write is dropped if the stored entry came from a later request
    Monotonic,
}

/// Keyed store for weather responses
pub trait CachePort: Send + Sync + std::fmt::Debug {
    /// Entry stored under `key`, fresh or not
    fn get(&self, key: &CacheKey) -> Option<CacheEntry>;

    /// Insert or replace the entry under `key`
    fn put(&self, key: CacheKey, entry: CacheEntry) -> WriteOutcome;

    /// Number of stored entries
    fn len(&self) -> usize;

    /// Whether nothing has been stored yet
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Write statistics
    fn stats(&self) -> CacheStats;
}

/// Cache write statistics for monitoring
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Current number of entries
    pub entries: u64,
    /// Number of stored writes
    pub writes: u64,
    /// Number of writes dropped by monotonic ordering
    pub discarded_writes: u64,
}
