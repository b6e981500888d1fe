//! Length-prefixed padding codec for lookup responses.
//!
//! The lookup service pads every response body to a uniform size so that
//! response lengths reveal nothing about which publishers were queried. The
//! wire layout is:
//!
//! ```text
//! [length: u32 big-endian][payload bytes][arbitrary trailing padding]
//! ```
//!
//! This codec reverses that padding deterministically. It is a pure
//! transformation with no side effects.

use thiserror::Error;

/// Size of the big-endian length header.
const LENGTH_HEADER_SIZE: usize = 4;

/// Errors produced while unframing a padded response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FramingError {
    /// The buffer is too short to contain the length header.
    #[error("buffer of {0} bytes is too short for the length header")]
    HeaderTooShort(usize),

    /// The declared payload length exceeds the bytes that follow the header.
    #[error("payload of {available} bytes is shorter than declared length {declared}")]
    PayloadTooShort {
        /// Length declared in the header.
        declared: usize,
        /// Bytes actually present after the header.
        available: usize,
    },

    /// The payload is too large to be length-prefixed with a u32 header.
    #[error("payload of {0} bytes does not fit a u32 length header")]
    PayloadTooLarge(usize),
}

/// Strip the length header and trailing padding from a padded buffer,
/// returning exactly the payload bytes.
///
/// # Errors
///
/// Returns [`FramingError::HeaderTooShort`] if `padded` holds fewer than four
/// bytes, or [`FramingError::PayloadTooShort`] if the remaining bytes are
/// fewer than the declared payload length.
pub fn unpad(padded: &[u8]) -> Result<&[u8], FramingError> {
    if padded.len() < LENGTH_HEADER_SIZE {
        return Err(FramingError::HeaderTooShort(padded.len()));
    }

    let (header, body) = padded.split_at(LENGTH_HEADER_SIZE);
    let mut length_bytes = [0u8; LENGTH_HEADER_SIZE];
    length_bytes.copy_from_slice(header);
    let declared = u32::from_be_bytes(length_bytes) as usize;

    if body.len() < declared {
        return Err(FramingError::PayloadTooShort {
            declared,
            available: body.len(),
        });
    }

    Ok(&body[..declared])
}

/// Frame a payload with a length header and `pad_len` zero padding bytes.
///
/// The inverse of [`unpad`]; the service side of the framing contract.
///
/// # Errors
///
/// Returns [`FramingError::PayloadTooLarge`] if the payload length does not
/// fit in a u32 header.
pub fn pad(payload: &[u8], pad_len: usize) -> Result<Vec<u8>, FramingError> {
    let declared =
        u32::try_from(payload.len()).map_err(|_| FramingError::PayloadTooLarge(payload.len()))?;

    let mut framed = Vec::with_capacity(LENGTH_HEADER_SIZE + payload.len() + pad_len);
    framed.extend_from_slice(&declared.to_be_bytes());
    framed.extend_from_slice(payload);
    framed.resize(framed.len() + pad_len, 0);
    Ok(framed)
}
