//! Domain types for resolved publisher metadata.
//!
//! A [`PublisherRecord`] is a value object: once a resolution completes it is
//! freely shared by copy and carries no references back into the resolver.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Verification status of a publisher, derived from the wire payload's
/// wallet-connection state. Never set directly by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublisherStatus {
    /// No custodial account is linked.
    #[default]
    NotVerified,
    /// A custodial account is linked but has not passed KYC.
    Connected,
    /// A KYC-verified custodial account is linked.
    Verified,
}

/// Optional presentation banner attached to a publisher.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PublisherBanner {
    /// Banner headline.
    pub title: String,
    /// Longer banner description.
    pub description: String,
    /// Internal resource reference for the background image, if any.
    pub background: Option<String>,
    /// Internal resource reference for the logo image, if any.
    pub logo: Option<String>,
    /// Suggested donation amounts, in source order.
    pub amounts: Vec<f64>,
    /// Social links keyed by platform name; only non-empty links are kept.
    pub links: BTreeMap<String, String>,
}

/// Metadata describing a publisher, as resolved from the lookup service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublisherRecord {
    /// Opaque publisher key. Non-empty for any record returned from a
    /// successful resolution.
    pub publisher_key: String,
    /// Derived verification status.
    pub status: PublisherStatus,
    /// Payout address; may be empty.
    pub address: String,
    /// Seconds since the epoch at which this record was fetched. Stamped by
    /// the resolver when a network fetch succeeds, never back-dated.
    pub updated_at: i64,
    /// Optional presentation banner.
    pub banner: Option<PublisherBanner>,
}

impl PublisherRecord {
    /// Create a record with the given key and status, no banner, and an
    /// unset timestamp.
    #[must_use]
    pub fn new(publisher_key: impl Into<String>, status: PublisherStatus) -> Self {
        Self {
            publisher_key: publisher_key.into(),
            status,
            address: String::new(),
            updated_at: 0,
            banner: None,
        }
    }

    /// True if the publisher has a linked custodial account (connected or
    /// fully verified).
    #[must_use]
    pub fn is_connected(&self) -> bool {
        matches!(
            self.status,
            PublisherStatus::Connected | PublisherStatus::Verified
        )
    }
}
