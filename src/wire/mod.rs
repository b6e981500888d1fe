//! Wire formats used by the lookup service.
//!
//! Responses arrive double-wrapped: a protobuf container of channel
//! responses ([`channel`]), padded to a uniform size behind a length-prefix
//! header ([`padding`]). Unframing and decoding are both pure; neither
//! touches the clock or any shared state.

pub mod channel;
pub mod padding;

pub use channel::{decode_publisher, ChannelResponse, ChannelResponseList, MEDIA_RESOURCE_PREFIX};
pub use padding::{pad, unpad, FramingError};
