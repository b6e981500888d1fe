//! Freshness policy for cached publisher records.
//!
//! A pure function of the caller-supplied clock reading and a record's
//! `updated_at` timestamp; no suspension, no shared state.

use crate::record::PublisherRecord;
use tracing::warn;

/// Default time-to-live for a cached record: five hours.
pub const DEFAULT_TTL_SECS: i64 = 60 * 60 * 5;

/// Decide whether a cached record is stale and must be re-fetched.
///
/// A missing record is always expired. A record whose `updated_at` lies in
/// the future (negative elapsed time) is treated as *not* expired for this
/// read: the stored timestamp or our clock is assumed wrong, rather than the
/// data ancient, which avoids re-fetching on every read while the skew
/// persists. The anomaly is logged so operators can spot corrupted
/// timestamps.
#[must_use]
pub fn is_expired(record: Option<&PublisherRecord>, now: i64, ttl_secs: i64) -> bool {
    let Some(record) = record else {
        return true;
    };

    let elapsed = now - record.updated_at;
    if elapsed < 0 {
        warn!(
            publisher_key = %record.publisher_key,
            elapsed,
            "negative record age; assuming clock skew or corrupted timestamp"
        );
    }

    elapsed > ttl_secs
}
