//! In-memory response cache
//!
//! Keyed store for the session's weather responses. Entries are never
//! evicted: a stale entry stays until a later successful fetch for the same
//! key replaces it, and freshness is decided by the reader.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use application::ports::{CacheEntry, CachePort, CacheStats, WriteOrdering, WriteOutcome};
use domain::CacheKey;
use parking_lot::RwLock;
use tracing::debug;

/// `HashMap` behind a `parking_lot::RwLock`
pub struct InMemoryResponseCache {
    entries: RwLock<HashMap<CacheKey, CacheEntry>>,
    ordering: WriteOrdering,
    writes: AtomicU64,
    discarded: AtomicU64,
}

impl std::fmt::Debug for InMemoryResponseCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryResponseCache")
            .field("entries", &self.entries.read().len())
            .field("ordering", &self.ordering)
            .field("writes", &self.writes.load(Ordering::Relaxed))
            .field("discarded", &self.discarded.load(Ordering::Relaxed))
            .finish()
    }
}

impl Default for InMemoryResponseCache {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryResponseCache {
    /// Create an empty last-write-wins cache
    #[must_use]
    pub fn new() -> Self {
        Self::with_ordering(WriteOrdering::default())
    }

    /// Create an empty cache with the given write ordering
    #[must_use]
    pub fn with_ordering(ordering: WriteOrdering) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ordering,
            writes: AtomicU64::new(0),
            discarded: AtomicU64::new(0),
        }
    }

    /// Keys currently stored, in no particular order
    #[must_use]
    pub fn keys(&self) -> Vec<CacheKey> {
        self.entries.read().keys().cloned().collect()
    }
}

impl CachePort for InMemoryResponseCache {
    fn get(&self, key: &CacheKey) -> Option<CacheEntry> {
        self.entries.read().get(key).cloned()
    }

    fn put(&self, key: CacheKey, entry: CacheEntry) -> WriteOutcome {
        let mut entries = self.entries.write();

        let superseded = self.ordering == WriteOrdering::Monotonic
            && entries
                .get(&key)
                .is_some_and(|existing| existing.requested_at > entry.requested_at);

        if superseded {
            self.discarded.fetch_add(1, Ordering::Relaxed);
            debug!(key = %key, "Discarded write from an older request");
            return WriteOutcome::Discarded;
        }

        entries.insert(key, entry);
        self.writes.fetch_add(1, Ordering::Relaxed);
        WriteOutcome::Stored
    }

    fn len(&self) -> usize {
        self.entries.read().len()
    }

    fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len() as u64,
            writes: self.writes.load(Ordering::Relaxed),
            discarded_writes: self.discarded.load(Ordering::Relaxed),
        }
    }
}
