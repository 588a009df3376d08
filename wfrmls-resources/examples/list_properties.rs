//! Lists a few active listings and recent deletions.
//!
//! Run with: `WFRMLS_BEARER_TOKEN=... cargo run -p wfrmls-resources --example list_properties -- [-v] [CITY]`

use anyhow::Context;
use chrono::{Duration, Utc};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use wfrmls_core::QueryParameters;
use wfrmls_resources::WfrmlsClient;
use wfrmls_resources::resources::DEFAULT_SYNC_RESOURCES;

fn setup_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("wfrmls=debug,info")
    } else {
        EnvFilter::new("wfrmls=warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let verbose = args.iter().any(|a| a == "-v" || a == "--verbose");
    let city = args.iter().find(|a| !a.starts_with('-')).cloned();

    setup_logging(verbose);

    let client = WfrmlsClient::new().context("Failed to configure the WFRMLS client")?;

    let params = QueryParameters::new()
        .top(10)
        .select(["ListingKey", "ListPrice", "City", "UnparsedAddress"])
        .orderby("ListPrice desc");
    let params = match &city {
        Some(city) => params.filter(wfrmls_core::odata::filter::eq("City", city)),
        None => params,
    };

    let listings = client
        .property()
        .active(params)
        .await
        .context("Failed to list active properties")?;

    println!("Active listings ({} shown):", listings.len());
    for record in &listings.value {
        println!(
            "  {:>12}  {:>12}  {}",
            record.get("ListingKey").and_then(|v| v.as_str()).unwrap_or("-"),
            record.get("ListPrice").map(ToString::to_string).unwrap_or_default(),
            record.get("UnparsedAddress").and_then(|v| v.as_str()).unwrap_or(""),
        );
    }

    let since = Utc::now() - Duration::hours(24);
    let sync = client
        .deleted()
        .sync_since(since, DEFAULT_SYNC_RESOURCES, QueryParameters::new().top(200))
        .await?;

    println!();
    println!("Deletions in the last 24 hours: {}", sync.total());
    for (kind, result) in &sync.by_resource {
        match result {
            Ok(records) => println!("  {:<12} {}", kind.as_str(), records.len()),
            Err(err) => println!("  {:<12} failed: {err}", kind.as_str()),
        }
    }

    Ok(())
}
