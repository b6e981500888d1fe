//! In-flight fetch registry.
//!
//! Tracks, per publisher key, the waiters queued behind a single network
//! fetch. `register` is the one serialization point that guarantees no two
//! fetches for the same key are ever in flight concurrently: whichever
//! caller creates the entry owns the fetch, everyone after it just queues.
//!
//! Operations on different keys are fully independent; the mutex is held
//! only for the map mutation itself, never across a suspension point.

use crate::record::PublisherRecord;
use parking_lot::Mutex;
use std::collections::HashMap;
use tokio::sync::oneshot;

/// One queued resolution waiter. Each waiter receives its own copy of the
/// resolved record (or `None`).
pub type Waiter = oneshot::Sender<Option<PublisherRecord>>;

/// Registry of pending fetches keyed by publisher key.
#[derive(Default)]
pub struct PendingRequests {
    waiters: Mutex<HashMap<String, Vec<Waiter>>>,
}

impl PendingRequests {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `waiter` behind the fetch for `key`, creating the entry if none
    /// exists. Returns `true` iff a fetch was already in flight, in which
    /// case the caller must not issue another one.
    pub fn register(&self, key: &str, waiter: Waiter) -> bool {
        let mut map = self.waiters.lock();
        if let Some(queue) = map.get_mut(key) {
            queue.push(waiter);
            true
        } else {
            map.insert(key.to_string(), vec![waiter]);
            false
        }
    }

    /// Atomically remove and return every waiter queued for `key`, in
    /// registration order.
    ///
    /// # Panics
    ///
    /// A drain is only ever triggered by a fetch completion, which must have
    /// had at least its own registration; draining a key with no waiters is
    /// a logic defect, not a runtime condition, and aborts.
    pub fn drain(&self, key: &str) -> Vec<Waiter> {
        let queue = self.waiters.lock().remove(key).unwrap_or_default();
        assert!(
            !queue.is_empty(),
            "drained pending-request entry for {key} with no waiters"
        );
        queue
    }

    /// True if a fetch for `key` is currently in flight.
    #[must_use]
    pub fn in_flight(&self, key: &str) -> bool {
        self.waiters.lock().contains_key(key)
    }
}
