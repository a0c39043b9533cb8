//! Feed-to-view transformation.
//!
//! Turns raw feed records into display items and derives the drill-down tag
//! list and the location list. The transformation is pure: the same records
//! and filters always produce the same [`ResultBundle`].
//!
//! # Per-item steps
//!
//! 1. Trim every tag, then drop the sentinel tag and empty tags
//! 2. Derive `location` from the host of the item's URL
//!
//! # Aggregates
//!
//! - `available_tags`: all item tags minus the applied filters, sorted and
//!   unique; empty once the filter depth ceiling is reached
//! - `locations`: all item locations, sorted and unique
//!
//! Items keep the feed's own order.

use crate::models::{
    Item, MAX_FILTER_DEPTH, RawItem, ResultBundle, SENTINEL_TAG, URL_PARSE_ERROR,
};
use itertools::Itertools;
use tracing::{debug, instrument};
use url::Url;

/// Host component of `url`, or the parse-error sentinel.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(location_for(Some("http://a.example.com/x")), "a.example.com");
/// assert_eq!(location_for(Some("not a url")), "URL Parse error");
/// ```
pub fn location_for(url: Option<&str>) -> String {
    url.and_then(|u| Url::parse(u.trim()).ok())
        .and_then(|parsed| parsed.host_str().map(str::to_string))
        .filter(|host| !host.is_empty())
        .unwrap_or_else(|| URL_PARSE_ERROR.to_string())
}

/// Trim tags and remove the sentinel, keeping feed order.
pub fn clean_tags(tags: &[String]) -> Vec<String> {
    tags.iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty() && *t != SENTINEL_TAG)
        .map(str::to_string)
        .collect()
}

fn normalize_item(raw: &RawItem) -> Item {
    Item {
        url: raw.url.clone().unwrap_or_default(),
        description: raw.description.clone(),
        note: raw.note.clone(),
        tags: clean_tags(&raw.tags),
        location: location_for(raw.url.as_deref()),
    }
}

/// Build the [`ResultBundle`] for `raw_items` filtered by `applied_tags`.
#[instrument(level = "debug", skip_all, fields(raw = raw_items.len(), applied = applied_tags.len()))]
pub fn normalize(raw_items: &[RawItem], applied_tags: &[String]) -> ResultBundle {
    let items: Vec<Item> = raw_items.iter().map(normalize_item).collect();

    let available_tags: Vec<String> = if applied_tags.len() >= MAX_FILTER_DEPTH {
        Vec::new()
    } else {
        items
            .iter()
            .flat_map(|item| item.tags.iter())
            .filter(|tag| !applied_tags.contains(tag))
            .cloned()
            .sorted()
            .dedup()
            .collect()
    };

    let locations: Vec<String> = items
        .iter()
        .map(|item| item.location.clone())
        .sorted()
        .dedup()
        .collect();

    debug!(
        items = items.len(),
        available_tags = available_tags.len(),
        locations = locations.len(),
        "Normalized feed"
    );

    ResultBundle {
        items,
        available_tags,
        locations,
    }
}
