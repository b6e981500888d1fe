//! End-to-end resolver scenarios against scripted transports.

#![allow(clippy::expect_used)]

use async_trait::async_trait;
use chrono::Utc;
use futures::future::join_all;
use prost::Message;
use publisher_ledger::wire::channel::{
    ChannelResponse, ChannelResponseList, SiteBannerDetails, SocialLinks, WalletConnectedState,
};
use publisher_ledger::wire::pad;
use publisher_ledger::{
    FetchResponse, MemoryStore, PublisherRecord, PublisherResolver, PublisherStatus,
    PublisherStore, ResolverConfig, ResolverEvent, Transport,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Transport that replays a scripted response and counts fetches.
struct ScriptedTransport {
    response: Option<FetchResponse>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl ScriptedTransport {
    fn new(response: FetchResponse) -> Self {
        Self {
            response: Some(response),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    fn failing() -> Self {
        Self {
            response: None,
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn fetch(&self, _url: &str) -> publisher_ledger::Result<FetchResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.response {
            Some(response) => Ok(response.clone()),
            None => Err(publisher_ledger::Error::Transport(
                "connection refused".to_string(),
            )),
        }
    }
}

fn entry(key: &str, state: WalletConnectedState, address: &str) -> ChannelResponse {
    ChannelResponse {
        channel_identifier: key.to_string(),
        wallet_connected_state: state as i32,
        wallet_address: address.to_string(),
        site_banner_details: None,
    }
}

/// Encode entries into a framed 200 response with some padding.
fn framed_response(entries: Vec<ChannelResponse>) -> FetchResponse {
    let payload = ChannelResponseList {
        channel_responses: entries,
    }
    .encode_to_vec();
    let framed = pad(&payload, 64).expect("framed");
    FetchResponse::new(200, framed)
}

fn resolver_with(
    transport: Arc<ScriptedTransport>,
    store: Arc<MemoryStore>,
) -> PublisherResolver {
    let config = ResolverConfig {
        endpoint: "https://publishers.example.com".to_string(),
        ..ResolverConfig::default()
    };
    PublisherResolver::new(config, store, transport)
}

fn stored_record(key: &str, updated_at: i64) -> PublisherRecord {
    let mut record = PublisherRecord::new(key, PublisherStatus::Verified);
    record.address = "0xCACHED".to_string();
    record.updated_at = updated_at;
    record
}

/// Wait for the detached write-through task to land.
async fn wait_for_persist(store: &MemoryStore, key: &str) -> Option<PublisherRecord> {
    for _ in 0..100 {
        if let Ok(Some(record)) = store.get(key).await {
            return Some(record);
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    None
}

#[tokio::test]
async fn end_to_end_resolution() {
    let transport = Arc::new(ScriptedTransport::new(framed_response(vec![entry(
        "pub_42",
        WalletConnectedState::AccountNoKyc,
        "0xABC",
    )])));
    let store = Arc::new(MemoryStore::new());
    let resolver = resolver_with(Arc::clone(&transport), Arc::clone(&store));

    let before = Utc::now().timestamp();
    let record = resolver.resolve("pub_42").await.expect("record");

    assert_eq!(record.publisher_key, "pub_42");
    assert_eq!(record.status, PublisherStatus::Connected);
    assert_eq!(record.address, "0xABC");
    assert!(record.updated_at >= before);
    assert_eq!(transport.calls(), 1);

    // Write-through persistence is detached but must land.
    let persisted = wait_for_persist(&store, "pub_42").await.expect("persisted");
    assert_eq!(persisted, record);
}

#[tokio::test]
async fn concurrent_resolves_share_one_fetch() {
    let transport = Arc::new(
        ScriptedTransport::new(framed_response(vec![entry(
            "brave.com",
            WalletConnectedState::AccountKyc,
            "0xDEF",
        )]))
        .with_delay(Duration::from_millis(200)),
    );
    let store = Arc::new(MemoryStore::new());
    let resolver = Arc::new(resolver_with(Arc::clone(&transport), store));

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let resolver = Arc::clone(&resolver);
            tokio::spawn(async move { resolver.resolve("brave.com").await })
        })
        .collect();

    let results: Vec<_> = join_all(tasks)
        .await
        .into_iter()
        .map(|joined| joined.expect("task"))
        .collect();

    assert_eq!(transport.calls(), 1);
    let first = results[0].clone().expect("record");
    for result in &results {
        assert_eq!(result.as_ref(), Some(&first));
    }
}

#[tokio::test]
async fn fresh_cached_record_short_circuits() {
    let transport = Arc::new(ScriptedTransport::new(framed_response(vec![])));
    let store = Arc::new(MemoryStore::new());

    let now = Utc::now().timestamp();
    let cached = stored_record("brave.com", now - 10);
    store.put("brave.com", &cached).await.expect("put");

    let resolver = resolver_with(Arc::clone(&transport), store);
    let record = resolver.resolve("brave.com").await.expect("record");

    assert_eq!(record, cached);
    assert_eq!(transport.calls(), 0);
    assert_eq!(resolver.stats().store_hits, 1);
}

#[tokio::test]
async fn expired_record_triggers_refetch() {
    let transport = Arc::new(ScriptedTransport::new(framed_response(vec![entry(
        "brave.com",
        WalletConnectedState::AccountNoKyc,
        "0xFRESH",
    )])));
    let store = Arc::new(MemoryStore::new());

    let now = Utc::now().timestamp();
    store
        .put("brave.com", &stored_record("brave.com", now - 20_000))
        .await
        .expect("put");

    let resolver = resolver_with(Arc::clone(&transport), store);
    let record = resolver.resolve("brave.com").await.expect("record");

    assert_eq!(transport.calls(), 1);
    assert_eq!(record.address, "0xFRESH");
    assert_eq!(record.status, PublisherStatus::Connected);
}

#[tokio::test]
async fn skewed_future_timestamp_is_served_without_refetch() {
    let transport = Arc::new(ScriptedTransport::new(framed_response(vec![])));
    let store = Arc::new(MemoryStore::new());

    let now = Utc::now().timestamp();
    let cached = stored_record("brave.com", now + 3_600);
    store.put("brave.com", &cached).await.expect("put");

    let resolver = resolver_with(Arc::clone(&transport), store);
    let record = resolver.resolve("brave.com").await.expect("record");

    assert_eq!(record, cached);
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn not_found_resolves_to_none_without_persistence() {
    let transport = Arc::new(ScriptedTransport::new(FetchResponse::new(404, "")));
    let store = Arc::new(MemoryStore::new());
    let resolver = resolver_with(Arc::clone(&transport), Arc::clone(&store));

    assert_eq!(resolver.resolve("unknown.org").await, None);
    assert_eq!(transport.calls(), 1);

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(store.is_empty());
}

#[tokio::test]
async fn transport_failure_resolves_to_none() {
    let transport = Arc::new(ScriptedTransport::failing());
    let store = Arc::new(MemoryStore::new());
    let resolver = resolver_with(Arc::clone(&transport), store);

    assert_eq!(resolver.resolve("brave.com").await, None);
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn garbage_body_resolves_to_none() {
    let transport = Arc::new(ScriptedTransport::new(FetchResponse::new(
        200,
        vec![0xDE, 0xAD],
    )));
    let store = Arc::new(MemoryStore::new());
    let resolver = resolver_with(Arc::clone(&transport), store);

    assert_eq!(resolver.resolve("brave.com").await, None);
}

#[tokio::test]
async fn response_without_matching_entry_resolves_to_none() {
    let transport = Arc::new(ScriptedTransport::new(framed_response(vec![entry(
        "other.org",
        WalletConnectedState::AccountKyc,
        "0x123",
    )])));
    let store = Arc::new(MemoryStore::new());
    let resolver = resolver_with(Arc::clone(&transport), store);

    assert_eq!(resolver.resolve("brave.com").await, None);
}

#[tokio::test]
async fn banner_survives_the_full_path() {
    let mut with_banner = entry("brave.com", WalletConnectedState::AccountKyc, "0xABC");
    with_banner.site_banner_details = Some(SiteBannerDetails {
        title: "Support brave.com".to_string(),
        description: "Every bit helps".to_string(),
        background_url: "bg.png".to_string(),
        logo_url: "logo.png".to_string(),
        donation_amounts: vec![1.0, 5.0, 10.0],
        social_links: Some(SocialLinks {
            youtube: String::new(),
            twitter: "https://twitter.com/brave".to_string(),
            twitch: String::new(),
        }),
    });

    let transport = Arc::new(ScriptedTransport::new(framed_response(vec![with_banner])));
    let store = Arc::new(MemoryStore::new());
    let resolver = resolver_with(Arc::clone(&transport), store);

    let record = resolver.resolve("brave.com").await.expect("record");
    let banner = record.banner.expect("banner");

    assert_eq!(banner.title, "Support brave.com");
    assert_eq!(
        banner.background.as_deref(),
        Some("resource://publisher-media/bg.png")
    );
    assert_eq!(banner.amounts, vec![1.0, 5.0, 10.0]);
    assert_eq!(banner.links.len(), 1);
    assert_eq!(
        banner.links.get("twitter").map(String::as_str),
        Some("https://twitter.com/brave")
    );
}

#[tokio::test]
async fn events_report_resolution_outcomes() {
    let transport = Arc::new(ScriptedTransport::new(FetchResponse::new(404, "")));
    let store = Arc::new(MemoryStore::new());
    let resolver = resolver_with(Arc::clone(&transport), store);

    let mut events = resolver.subscribe_events();
    assert_eq!(resolver.resolve("unknown.org").await, None);

    match events.recv().await.expect("event") {
        ResolverEvent::NotFound { publisher_key } => {
            assert_eq!(publisher_key, "unknown.org");
        }
        other => unreachable!("unexpected event {other:?}"),
    }
}

#[tokio::test]
async fn dedup_stats_are_tracked() {
    let transport = Arc::new(
        ScriptedTransport::new(framed_response(vec![entry(
            "brave.com",
            WalletConnectedState::AccountNoKyc,
            "0xABC",
        )]))
        .with_delay(Duration::from_millis(100)),
    );
    let store = Arc::new(MemoryStore::new());
    let resolver = Arc::new(resolver_with(Arc::clone(&transport), store));

    let tasks: Vec<_> = (0..4)
        .map(|_| {
            let resolver = Arc::clone(&resolver);
            tokio::spawn(async move { resolver.resolve("brave.com").await })
        })
        .collect();
    let _ = join_all(tasks).await;

    // Every resolve takes exactly one path: store hit, dedup queue, or the
    // owned fetch.
    let stats = resolver.stats();
    assert_eq!(stats.fetches, 1);
    assert_eq!(stats.store_hits + stats.deduped + stats.fetches, 4);
}
