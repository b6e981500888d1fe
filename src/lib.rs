//! Publisher metadata resolution with caching and request deduplication.
//!
//! Given an opaque publisher key, [`PublisherResolver`] returns a
//! [`PublisherRecord`] describing that publisher's verification status,
//! payout address and optional presentation banner. Records come from a
//! remote lookup service and are cached in a pluggable store; a cached
//! record is served as long as it is within its TTL, and concurrent lookups
//! for the same key share a single network fetch.
//!
//! # Example
//!
//! ```rust,ignore
//! use publisher_ledger::{
//!     HttpTransport, MemoryStore, PublisherResolver, ResolverConfig,
//! };
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ResolverConfig {
//!         endpoint: "https://publishers.example.com".to_string(),
//!         ..ResolverConfig::default()
//!     };
//!
//!     let store = Arc::new(MemoryStore::with_capacity(config.store_capacity));
//!     let transport = Arc::new(HttpTransport::new(Duration::from_secs(
//!         config.request_timeout_secs,
//!     ))?);
//!     let resolver = PublisherResolver::new(config, store, transport);
//!
//!     match resolver.resolve("brave.com").await {
//!         Some(record) => println!("{:?} at {}", record.status, record.address),
//!         None => println!("publisher unknown"),
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod event;
pub mod prefix;
pub mod record;
pub mod resolver;
pub mod store;
pub mod transport;
pub mod wire;

pub use config::ResolverConfig;
pub use error::{Error, Result};
pub use event::{ResolverEvent, ResolverEventsChannel};
pub use record::{PublisherBanner, PublisherRecord, PublisherStatus};
pub use resolver::{PublisherResolver, ResolverStats};
pub use store::{MemoryStore, PublisherStore};
pub use transport::{FetchResponse, HttpTransport, Transport};
