//! In-process cache of per-item vote counts.
//!
//! Entries expire a fixed TTL after insertion and are dropped lazily on
//! access. The cache is bounded; inserting into a full cache evicts the
//! least-recently-used entry whether or not it has expired. Losing an entry
//! only costs a store round-trip, never correctness.
//!
//! Every entry carries the toggle version its count was read at. Writers that
//! finish out of order cannot replace a newer count with an older one.

use lru::LruCache;
use serde::Serialize;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::Config;

#[derive(Debug, Clone, Copy)]
struct CachedCount {
    count: i64,
    version: i64,
    inserted_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub entries: usize,
    pub capacity: usize,
    pub hits: u64,
    pub misses: u64,
}

pub struct CountCache {
    entries: Mutex<LruCache<Uuid, CachedCount>>,
    ttl: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl CountCache {
    pub fn new(capacity: NonZeroUsize, ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            ttl,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let capacity = NonZeroUsize::new(config.count_cache_capacity).unwrap_or(NonZeroUsize::MIN);
        Self::new(
            capacity,
            Duration::from_secs(config.count_cache_ttl_seconds),
        )
    }

    /// Cached count for `item_id`, or `None` when absent or expired.
    pub fn get(&self, item_id: &Uuid) -> Option<i64> {
        let mut entries = self.lock("get");
        let lookup = entries
            .get(item_id)
            .map(|entry| (entry.count, entry.inserted_at.elapsed() < self.ttl));
        let cached = match lookup {
            Some((count, true)) => Some(count),
            Some((_, false)) => {
                entries.pop(item_id);
                debug!(%item_id, "count cache entry expired");
                None
            }
            None => None,
        };
        drop(entries);

        match cached {
            Some(_) => self.hits.fetch_add(1, Ordering::Relaxed),
            None => self.misses.fetch_add(1, Ordering::Relaxed),
        };
        cached
    }

    /// Insert or refresh an entry with a fresh expiry, unless the cache
    /// already holds a count read at a higher version. Returns whether the
    /// write was applied.
    pub fn set_if_newer(&self, item_id: Uuid, count: i64, version: i64) -> bool {
        let mut entries = self.lock("set_if_newer");
        if let Some(current) = entries.peek(&item_id) {
            if current.version > version {
                debug!(
                    %item_id,
                    cached_version = current.version,
                    offered_version = version,
                    "ignoring count older than cached entry"
                );
                return false;
            }
        }

        let entry = CachedCount {
            count,
            version,
            inserted_at: Instant::now(),
        };
        if let Some((evicted, _)) = entries.push(item_id, entry) {
            if evicted != item_id {
                debug!(%evicted, "count cache full, evicted least recently used entry");
            }
        }
        true
    }

    pub fn invalidate(&self, item_id: &Uuid) {
        self.lock("invalidate").pop(item_id);
    }

    pub fn len(&self) -> usize {
        self.lock("len").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        let entries = self.lock("stats");
        CacheStats {
            entries: entries.len(),
            capacity: entries.cap().get(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    fn lock(&self, op: &'static str) -> MutexGuard<'_, LruCache<Uuid, CachedCount>> {
        match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                warn!(op, "recovered poisoned count cache lock");
                poisoned.into_inner()
            }
        }
    }
}
