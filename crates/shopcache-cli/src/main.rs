//! shopcache CLI - inspect and sync the local storefront cache.
//!
//! The storefront UI talks to the same library this binary wraps; the
//! CLI exists to look at what is cached, force a refresh, or start
//! over with a clean slate.

use std::io;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use shopcache_core::{Config, RefreshOutcome, ShopData};

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();
    info!("shopcache starting");

    let args: Vec<String> = std::env::args().collect();

    let config = Config::load()?;

    match args.get(1).map(String::as_str) {
        Some("connect") => match args.get(2) {
            Some(url) => connect(config, url, args.get(3).cloned()),
            None => {
                eprintln!("connect needs an API base URL\n");
                print_usage();
                Ok(())
            }
        },
        Some("sync") => sync(&ShopData::open(&config)?).await,
        Some("show") => match args.get(2) {
            Some(name) => show(&ShopData::open(&config)?, name).await,
            None => {
                eprintln!("show needs a collection name\n");
                print_usage();
                Ok(())
            }
        },
        Some("clear") => {
            ShopData::open(&config)?.clear().await?;
            eprintln!("Local snapshots cleared");
            Ok(())
        }
        Some(other) if other != "help" && other != "--help" => {
            anyhow::bail!("unknown command: {}", other)
        }
        _ => {
            print_usage();
            Ok(())
        }
    }
}

/// Point the cache at a storefront API and persist the choice.
fn connect(mut config: Config, url: &str, shop_id: Option<String>) -> Result<()> {
    config.api_base_url = url.trim_end_matches('/').to_string();
    config.shop_id = shop_id;
    config.save()?;
    match &config.shop_id {
        Some(shop) => eprintln!("Configured {} (shop {})", config.api_base_url, shop),
        None => eprintln!("Configured {}", config.api_base_url),
    }
    Ok(())
}

/// Refresh every collection and report what changed.
async fn sync(data: &ShopData) -> Result<()> {
    eprintln!("Refreshing all collections...");
    for (key, outcome) in data.refresh_all().await {
        match outcome {
            RefreshOutcome::Applied => eprintln!("  {:<12} updated", key),
            RefreshOutcome::Discarded => eprintln!("  {:<12} unchanged", key),
        }
    }
    Ok(())
}

/// Print the cached copy of one collection, then report whether the
/// refresh it triggered brought anything newer.
async fn show(data: &ShopData, name: &str) -> Result<()> {
    let (json, refresh) = match name {
        "products" => {
            let (items, refresh) = data.products().await;
            (serde_json::to_string_pretty(&items)?, refresh)
        }
        "categories" => {
            let (items, refresh) = data.categories().await;
            (serde_json::to_string_pretty(&items)?, refresh)
        }
        "brands" => {
            let (items, refresh) = data.brands().await;
            (serde_json::to_string_pretty(&items)?, refresh)
        }
        "pages" => {
            let (items, refresh) = data.pages().await;
            (serde_json::to_string_pretty(&items)?, refresh)
        }
        "blog" => {
            let (items, refresh) = data.blog_posts().await;
            (serde_json::to_string_pretty(&items)?, refresh)
        }
        "coupons" => {
            let (items, refresh) = data.coupons().await;
            (serde_json::to_string_pretty(&items)?, refresh)
        }
        "orders" => {
            let (items, refresh) = data.orders().await;
            (serde_json::to_string_pretty(&items)?, refresh)
        }
        "quotes" => {
            let (items, refresh) = data.quotes().await;
            (serde_json::to_string_pretty(&items)?, refresh)
        }
        "contact" => {
            let (items, refresh) = data.contact_messages().await;
            (serde_json::to_string_pretty(&items)?, refresh)
        }
        "settings" => {
            let (settings, refresh) = data.settings().await;
            (serde_json::to_string_pretty(&settings)?, refresh)
        }
        other => anyhow::bail!("unknown collection: {}", other),
    };

    println!("{}", json);

    match refresh.wait().await {
        RefreshOutcome::Applied => {
            eprintln!("(background refresh applied; run again for fresh data)")
        }
        RefreshOutcome::Discarded => eprintln!("(background refresh made no change)"),
    }
    Ok(())
}

fn print_usage() {
    eprintln!("shopcache - offline-first cache for the storefront API");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  shopcache connect <url> [shop]  point the cache at a storefront API");
    eprintln!("  shopcache sync                  refresh every collection from the API");
    eprintln!("  shopcache show <collection>     print a cached collection as JSON");
    eprintln!("  shopcache clear                 drop all local snapshots");
    eprintln!();
    eprintln!("Collections: products, categories, brands, pages, blog, coupons,");
    eprintln!("             orders, quotes, contact, settings");
}
