//! Publisher resolution orchestrator.
//!
//! This is the only component callers touch. It composes the store, the
//! freshness policy, the pending-request registry and the wire codecs
//! strictly downward; none of those know about each other.

use crate::config::ResolverConfig;
use crate::event::{
    create_event_channel, ResolverEvent, ResolverEventsChannel, ResolverEventsSender,
};
use crate::prefix;
use crate::record::PublisherRecord;
use crate::resolver::freshness;
use crate::resolver::registry::PendingRequests;
use crate::store::PublisherStore;
use crate::transport::{FetchResponse, Transport};
use crate::wire;
use chrono::Utc;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

/// Resolver statistics for monitoring.
#[derive(Debug, Default, Clone)]
pub struct ResolverStats {
    /// Resolutions served from the store without a fetch.
    pub store_hits: u64,
    /// Network fetches issued.
    pub fetches: u64,
    /// Resolutions that queued behind an in-flight fetch.
    pub deduped: u64,
}

/// Resolves publisher records, serving from the store when fresh and
/// collapsing concurrent lookups for the same key into one network fetch.
pub struct PublisherResolver {
    store: Arc<dyn PublisherStore>,
    transport: Arc<dyn Transport>,
    pending: PendingRequests,
    config: ResolverConfig,
    events_tx: ResolverEventsSender,
    stats: Mutex<ResolverStats>,
}

impl PublisherResolver {
    /// Create a resolver over the given store and transport.
    #[must_use]
    pub fn new(
        config: ResolverConfig,
        store: Arc<dyn PublisherStore>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let (events_tx, _events_rx) = create_event_channel();

        info!(
            endpoint = %config.endpoint,
            ttl_secs = config.ttl_secs,
            "publisher resolver initialized"
        );

        Self {
            store,
            transport,
            pending: PendingRequests::new(),
            config,
            events_tx,
            stats: Mutex::new(ResolverStats::default()),
        }
    }

    /// Subscribe to resolver events.
    #[must_use]
    pub fn subscribe_events(&self) -> ResolverEventsChannel {
        self.events_tx.subscribe()
    }

    /// Get current resolver statistics.
    #[must_use]
    pub fn stats(&self) -> ResolverStats {
        self.stats.lock().clone()
    }

    /// Resolve the record for `publisher_key`.
    ///
    /// Serves from the store when a record exists and is within its TTL.
    /// Otherwise exactly one network fetch runs per key at a time; callers
    /// arriving while one is in flight queue behind it and all receive the
    /// same outcome. `None` means the publisher is unknown or the fetch
    /// failed; no error escapes this boundary.
    pub async fn resolve(&self, publisher_key: &str) -> Option<PublisherRecord> {
        let cached = match self.store.get(publisher_key).await {
            Ok(record) => record,
            Err(e) => {
                warn!(%publisher_key, "store read failed: {e}");
                None
            }
        };

        let now = Utc::now().timestamp();
        if !freshness::is_expired(cached.as_ref(), now, self.config.ttl_secs) {
            debug!(%publisher_key, "serving publisher record from store");
            self.stats.lock().store_hits += 1;
            return cached;
        }

        let (tx, rx) = oneshot::channel();
        if self.pending.register(publisher_key, tx) {
            debug!(%publisher_key, "fetch already in flight; queueing");
            self.stats.lock().deduped += 1;
            return rx.await.unwrap_or(None);
        }

        // This call owns the fetch for the key.
        let record = self.fetch_publisher(publisher_key).await;

        if let Some(ref record) = record {
            self.persist(record.clone());
            let _ = self.events_tx.send(ResolverEvent::Resolved {
                publisher_key: publisher_key.to_string(),
            });
        } else {
            let _ = self.events_tx.send(ResolverEvent::NotFound {
                publisher_key: publisher_key.to_string(),
            });
        }

        // Deliver the same outcome to every waiter, ourselves included, in
        // registration order. A dropped waiter is tolerated.
        for waiter in self.pending.drain(publisher_key) {
            let _ = waiter.send(record.clone());
        }

        rx.await.unwrap_or(None)
    }

    async fn fetch_publisher(&self, publisher_key: &str) -> Option<PublisherRecord> {
        self.stats.lock().fetches += 1;

        let url = prefix::lookup_url(&self.config.endpoint, publisher_key, self.config.prefix_len);
        debug!(%publisher_key, %url, "fetching publisher record");

        match self.transport.fetch(&url).await {
            Ok(response) => self.parse_response(publisher_key, &response),
            Err(e) => {
                warn!(%publisher_key, "publisher fetch failed: {e}");
                let _ = self.events_tx.send(ResolverEvent::FetchFailed {
                    publisher_key: publisher_key.to_string(),
                    message: e.to_string(),
                });
                None
            }
        }
    }

    /// Unwrap a lookup response into a record. Every failure mode collapses
    /// to `None`; a 404 is the expected "publisher unknown" answer and is
    /// only logged for diagnostics.
    fn parse_response(
        &self,
        publisher_key: &str,
        response: &FetchResponse,
    ) -> Option<PublisherRecord> {
        if !response.is_success() || response.body.is_empty() {
            if response.is_not_found() {
                debug!(%publisher_key, "publisher not known to the lookup service");
            } else {
                warn!(
                    %publisher_key,
                    status = response.status,
                    "unexpected lookup response"
                );
            }
            return None;
        }

        let payload = match wire::unpad(&response.body) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(%publisher_key, "invalid response framing: {e}");
                return None;
            }
        };

        let mut record = wire::decode_publisher(payload, publisher_key)?;
        record.updated_at = Utc::now().timestamp();
        Some(record)
    }

    /// Write-through persistence as a detached task. A write failure is
    /// reported on the event channel and logged; it never blocks or alters
    /// delivery of the record to callers.
    fn persist(&self, record: PublisherRecord) {
        let store = Arc::clone(&self.store);
        let events_tx = self.events_tx.clone();

        tokio::spawn(async move {
            if let Err(e) = store.put(&record.publisher_key, &record).await {
                warn!(
                    publisher_key = %record.publisher_key,
                    "failed to persist publisher record: {e}"
                );
                let _ = events_tx.send(ResolverEvent::StoreWriteFailed {
                    publisher_key: record.publisher_key.clone(),
                    message: e.to_string(),
                });
            }
        });
    }
}
