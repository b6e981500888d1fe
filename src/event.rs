//! Resolver event system.
//!
//! Failures that must not surface through the caller-facing result, such as
//! write-through persistence failures, are reported here.

use tokio::sync::broadcast;

/// Events emitted by the resolver.
#[derive(Debug, Clone)]
pub enum ResolverEvent {
    /// A publisher record was resolved from the lookup service.
    Resolved {
        /// Publisher key.
        publisher_key: String,
    },

    /// The lookup service has no record for the publisher.
    NotFound {
        /// Publisher key.
        publisher_key: String,
    },

    /// A network fetch failed before yielding a usable response.
    FetchFailed {
        /// Publisher key.
        publisher_key: String,
        /// Failure description.
        message: String,
    },

    /// A resolved record could not be written back to the store. The record
    /// was still delivered to callers; the next lookup will re-fetch.
    StoreWriteFailed {
        /// Publisher key.
        publisher_key: String,
        /// Failure description.
        message: String,
    },
}

/// Channel for receiving resolver events.
pub type ResolverEventsChannel = broadcast::Receiver<ResolverEvent>;

/// Sender for resolver events.
pub type ResolverEventsSender = broadcast::Sender<ResolverEvent>;

/// Create a new event channel pair.
#[must_use]
pub fn create_event_channel() -> (ResolverEventsSender, ResolverEventsChannel) {
    broadcast::channel(256)
}
