//! Lookup-key derivation.
//!
//! Publishers are queried by a short hash prefix rather than by key, so a
//! single request covers every publisher whose key hashes under the prefix
//! and the request itself reveals little about which one was wanted.

use sha2::{Digest, Sha256};

/// Default number of hash bytes used for the query prefix.
pub const DEFAULT_PREFIX_LEN: usize = 2;

/// Hex-encode the first `prefix_len` bytes of the SHA-256 digest of
/// `publisher_key`.
#[must_use]
pub fn hash_prefix_hex(publisher_key: &str, prefix_len: usize) -> String {
    let digest = Sha256::digest(publisher_key.as_bytes());
    let take = prefix_len.min(digest.len());
    hex::encode(&digest[..take])
}

/// Build the lookup URL for a publisher key against `endpoint`.
#[must_use]
pub fn lookup_url(endpoint: &str, publisher_key: &str, prefix_len: usize) -> String {
    format!(
        "{}/publishers/prefixes/{}",
        endpoint.trim_end_matches('/'),
        hash_prefix_hex(publisher_key, prefix_len)
    )
}
