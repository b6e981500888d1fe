//! Store boundary for resolved publisher records.
//!
//! The resolver only needs a keyed read/write surface; anything from an LRU
//! map to a relational database can sit behind [`PublisherStore`]. The crate
//! bundles [`MemoryStore`], an LRU-bounded in-memory implementation suitable
//! for hosts without their own persistence layer and for tests.

use crate::error::Result;
use crate::record::PublisherRecord;
use async_trait::async_trait;
use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;

/// Default capacity for the in-memory store.
const DEFAULT_STORE_CAPACITY: usize = 10_000;

/// Keyed persistence boundary for publisher records.
#[async_trait]
pub trait PublisherStore: Send + Sync {
    /// Read the record stored for `publisher_key`, if any.
    async fn get(&self, publisher_key: &str) -> Result<Option<PublisherRecord>>;

    /// Write `record` under `publisher_key`, replacing any previous record.
    async fn put(&self, publisher_key: &str, record: &PublisherRecord) -> Result<()>;
}

/// Store statistics for monitoring.
#[derive(Debug, Default, Clone)]
pub struct StoreStats {
    /// Number of reads that found a record.
    pub hits: u64,
    /// Number of reads that found nothing.
    pub misses: u64,
    /// Number of records written.
    pub writes: u64,
}

impl StoreStats {
    /// Calculate hit rate as a percentage.
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

/// LRU-bounded in-memory publisher store.
pub struct MemoryStore {
    records: Mutex<LruCache<String, PublisherRecord>>,
    stats: Mutex<StoreStats>,
}

impl MemoryStore {
    /// Create a store with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_STORE_CAPACITY)
    }

    /// Create a store bounded to `capacity` records.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            records: Mutex::new(LruCache::new(cap)),
            stats: Mutex::new(StoreStats::default()),
        }
    }

    /// Get current store statistics.
    #[must_use]
    pub fn stats(&self) -> StoreStats {
        self.stats.lock().clone()
    }

    /// Get the current number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    /// Check if the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Remove all stored records.
    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PublisherStore for MemoryStore {
    async fn get(&self, publisher_key: &str) -> Result<Option<PublisherRecord>> {
        let record = self.records.lock().get(publisher_key).cloned();

        let mut stats = self.stats.lock();
        if record.is_some() {
            stats.hits += 1;
        } else {
            stats.misses += 1;
        }

        Ok(record)
    }

    async fn put(&self, publisher_key: &str, record: &PublisherRecord) -> Result<()> {
        self.records
            .lock()
            .put(publisher_key.to_string(), record.clone());
        self.stats.lock().writes += 1;
        Ok(())
    }
}
