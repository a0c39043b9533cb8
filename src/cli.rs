//! Command-line interface definitions for Wishboard.
//!
//! The positional arguments mirror the page route `/{user}/{tag1}/{tag2}`.

use clap::Parser;

/// Command-line arguments for the Wishboard application.
///
/// # Examples
///
/// ```sh
/// # A user's whole wishlist
/// wishboard gfontenot
///
/// # Drill down by two tags, pretty-printed
/// wishboard gfontenot books fiction --pretty
///
/// # Against another feed host, written to a file
/// wishboard gfontenot --feed-base http://localhost:8080 -o ./pages/gfontenot.json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Bookmark service username
    pub user: String,

    /// Tag filters, applied in order (at most two)
    pub tags: Vec<String>,

    /// Optional path to a config.yaml file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Feed base URL, overriding the config file
    #[arg(long, env = "WISHBOARD_FEED_BASE")]
    pub feed_base: Option<String>,

    /// Write the page JSON to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Pretty-print the page JSON
    #[arg(long)]
    pub pretty: bool,
}
