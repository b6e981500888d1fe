//! Publisher resolution.
//!
//! This module implements the resolve path:
//! 1. Serve from the store when a cached record is within its TTL
//! 2. Collapse concurrent lookups for one key into a single network fetch
//! 3. Unframe and decode the response, persist it, fan out to all waiters
//!
//! # Architecture
//!
//! ```text
//! resolve(key) called
//!        │
//!        ▼
//! ┌─────────────────────┐
//! │ Read record store   │
//! └─────────┬───────────┘
//!           │
//!    ┌──────┴──────┐
//!    │             │
//!  FRESH         STALE / ABSENT
//!    │             │
//!    ▼             ▼
//! Return      Register waiter
//!                  │
//!           ┌──────┴──────┐
//!           │             │
//!       IN FLIGHT     FIRST CALLER
//!           │             │
//!           ▼             ▼
//!     Await result   Fetch → unpad → decode
//!                         │
//!                         ▼
//!                  Persist (detached)
//!                         │
//!                         ▼
//!                  Drain waiters, deliver
//! ```

mod fetcher;
pub mod freshness;
mod registry;

pub use fetcher::{PublisherResolver, ResolverStats};
pub use freshness::{is_expired, DEFAULT_TTL_SECS};
pub use registry::{PendingRequests, Waiter};
