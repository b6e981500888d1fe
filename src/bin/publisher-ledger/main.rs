//! publisher-ledger CLI entry point.

mod cli;

use clap::Parser;
use cli::Cli;
use publisher_ledger::{HttpTransport, MemoryStore, PublisherResolver};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    info!("publisher-ledger v{}", env!("CARGO_PKG_VERSION"));

    // Build configuration
    let (config, keys) = cli.into_config()?;

    // Build the resolver
    let store = Arc::new(MemoryStore::with_capacity(config.store_capacity));
    let transport = Arc::new(HttpTransport::new(Duration::from_secs(
        config.request_timeout_secs,
    ))?);
    let resolver = PublisherResolver::new(config, store, transport);

    // Resolve each key and emit one JSON object per line
    for key in keys {
        let record = resolver.resolve(&key).await;
        let line = serde_json::json!({
            "publisher_key": key,
            "record": record,
        });
        println!("{line}");
    }

    Ok(())
}
