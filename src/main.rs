//! # Wishboard
//!
//! Turns a user's bookmark feed into a wishlist: every bookmark tagged `want`
//! becomes an item, with drill-down by up to two more tags.
//!
//! ## Usage
//!
//! ```sh
//! wishboard gfontenot books --pretty
//! ```
//!
//! ## Architecture
//!
//! Each invocation resolves one page:
//! 1. **Filter**: Validate the user and tag segments
//! 2. **Fetch**: One GET against the feed, no retries, no caching
//! 3. **Normalize**: Clean tags, derive locations, compute drill-down tags
//! 4. **Output**: Write the wishlist or error page as JSON

use clap::Parser;
use std::error::Error;
use tracing::{debug, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod error;
mod feed;
mod models;
mod normalize;
mod outputs;
mod utils;
mod view;

use cli::Cli;
use feed::HttpFetcher;
use models::Page;
use outputs::json;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let mut config = config::load_config(args.config.as_deref()).await?;
    if let Some(feed_base) = args.feed_base {
        config.feed_base = feed_base;
    }
    info!(feed_base = %config.feed_base, "wishboard starting up");

    let fetcher = HttpFetcher::new();
    let page = view::resolve(&fetcher, &config, &args.user, &args.tags).await;

    json::write_page(&page, args.output.as_deref(), args.pretty).await?;

    let kind = match &page {
        Page::Wishlist(_) => "wishlist",
        Page::Error(_) => "error",
    };
    info!(kind, elapsed_ms = start_time.elapsed().as_millis() as u128, "Execution complete");

    Ok(())
}
