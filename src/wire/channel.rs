//! Wire schema and decoder for channel responses.
//!
//! The lookup service answers a prefix query with a protobuf container of
//! channel responses, one per publisher whose key hash falls under the
//! queried prefix. The decoder scans the container for the entry matching
//! the requested key and maps it into a [`PublisherRecord`].
//!
//! Decoding fails closed: any structural mismatch yields `None` rather than
//! an error, so a malformed response is indistinguishable from an unknown
//! publisher at the caller's boundary.

use crate::record::{PublisherBanner, PublisherRecord, PublisherStatus};
use prost::Message;

/// Scheme prefix applied to banner image references so hosts can route them
/// through their own resource loader instead of fetching external URLs.
pub const MEDIA_RESOURCE_PREFIX: &str = "resource://publisher-media/";

/// Container of channel responses returned for one prefix query.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ChannelResponseList {
    /// Responses for all publishers under the queried prefix.
    #[prost(message, repeated, tag = "1")]
    pub channel_responses: Vec<ChannelResponse>,
}

/// Metadata for a single publisher channel.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ChannelResponse {
    /// Opaque publisher key this entry describes.
    #[prost(string, tag = "1")]
    pub channel_identifier: String,
    /// Custodial wallet connection state.
    #[prost(enumeration = "WalletConnectedState", tag = "2")]
    pub wallet_connected_state: i32,
    /// Payout address; may be empty.
    #[prost(string, tag = "3")]
    pub wallet_address: String,
    /// Optional site banner details.
    #[prost(message, optional, tag = "4")]
    pub site_banner_details: Option<SiteBannerDetails>,
}

/// Presentation banner substructure of a channel response.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SiteBannerDetails {
    /// Banner headline.
    #[prost(string, tag = "1")]
    pub title: String,
    /// Longer banner description.
    #[prost(string, tag = "2")]
    pub description: String,
    /// Raw background image reference.
    #[prost(string, tag = "3")]
    pub background_url: String,
    /// Raw logo image reference.
    #[prost(string, tag = "4")]
    pub logo_url: String,
    /// Suggested donation amounts.
    #[prost(double, repeated, tag = "5")]
    pub donation_amounts: Vec<f64>,
    /// Optional named social links.
    #[prost(message, optional, tag = "6")]
    pub social_links: Option<SocialLinks>,
}

/// Named social links carried by a banner.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SocialLinks {
    /// YouTube channel URL.
    #[prost(string, tag = "1")]
    pub youtube: String,
    /// Twitter profile URL.
    #[prost(string, tag = "2")]
    pub twitter: String,
    /// Twitch channel URL.
    #[prost(string, tag = "3")]
    pub twitch: String,
}

/// Custodial wallet connection state reported by the lookup service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum WalletConnectedState {
    /// No state reported.
    Unspecified = 0,
    /// A custodial account is connected but has not passed KYC.
    AccountNoKyc = 1,
    /// A KYC-verified custodial account is connected.
    AccountKyc = 2,
}

/// Fixed mapping from wire connection state to publisher status. Unknown or
/// absent states map to [`PublisherStatus::NotVerified`].
fn status_from_entry(entry: &ChannelResponse) -> PublisherStatus {
    match entry.wallet_connected_state() {
        WalletConnectedState::AccountKyc => PublisherStatus::Verified,
        WalletConnectedState::AccountNoKyc => PublisherStatus::Connected,
        WalletConnectedState::Unspecified => PublisherStatus::NotVerified,
    }
}

fn banner_from_details(details: &SiteBannerDetails) -> PublisherBanner {
    let mut banner = PublisherBanner {
        title: details.title.clone(),
        description: details.description.clone(),
        ..PublisherBanner::default()
    };

    if !details.background_url.is_empty() {
        banner.background = Some(format!("{MEDIA_RESOURCE_PREFIX}{}", details.background_url));
    }
    if !details.logo_url.is_empty() {
        banner.logo = Some(format!("{MEDIA_RESOURCE_PREFIX}{}", details.logo_url));
    }

    banner.amounts = details.donation_amounts.clone();

    if let Some(ref links) = details.social_links {
        for (platform, url) in [
            ("youtube", &links.youtube),
            ("twitter", &links.twitter),
            ("twitch", &links.twitch),
        ] {
            if !url.is_empty() {
                banner.links.insert(platform.to_string(), url.clone());
            }
        }
    }

    banner
}

/// Decode an unpadded payload and select the entry for `expected_key`.
///
/// Entries are not guaranteed unique; the first entry whose identifier equals
/// `expected_key` wins. Returns `None` if the container does not parse or no
/// entry matches. The returned record's `updated_at` is left at zero; the
/// caller stamps it, keeping this decoder pure with respect to time.
#[must_use]
pub fn decode_publisher(payload: &[u8], expected_key: &str) -> Option<PublisherRecord> {
    let list = ChannelResponseList::decode(payload).ok()?;

    let entry = list
        .channel_responses
        .iter()
        .find(|entry| entry.channel_identifier == expected_key)?;

    Some(PublisherRecord {
        publisher_key: entry.channel_identifier.clone(),
        status: status_from_entry(entry),
        address: entry.wallet_address.clone(),
        updated_at: 0,
        banner: entry.site_banner_details.as_ref().map(banner_from_details),
    })
}
