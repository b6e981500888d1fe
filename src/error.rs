//! Error types for publisher-ledger.

use thiserror::Error;

/// Errors produced by publisher-ledger operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be loaded or is invalid.
    #[error("Config error: {0}")]
    Config(String),

    /// The network transport failed to complete a request.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The record store failed to read or write.
    #[error("Store error: {0}")]
    Store(String),

    /// A padded response body could not be unframed.
    #[error("Framing error: {0}")]
    Framing(#[from] crate::wire::FramingError),

    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
