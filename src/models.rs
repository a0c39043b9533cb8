//! Data models for feed records and the views derived from them.
//!
//! This module defines the core data structures used throughout the application:
//! - [`RawItem`]: A bookmark record exactly as the feed returns it
//! - [`Item`]: A cleaned bookmark ready for display
//! - [`FilterState`]: The user and tag path a request asked for
//! - [`ResultBundle`]: The three collections produced by the normalizer
//! - [`RenderBundle`], [`ErrorView`], [`Page`]: What the view layer consumes
//!
//! The feed uses single-letter keys (`u`, `d`, `n`, `t`), hence the serde
//! renames on [`RawItem`].

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// The fixed marker tag that puts a bookmark on the wishlist.
pub const SENTINEL_TAG: &str = "want";

/// Provider-imposed ceiling on simultaneous tag filters.
pub const MAX_FILTER_DEPTH: usize = 2;

/// Location used when an item's URL has no usable host.
pub const URL_PARSE_ERROR: &str = "URL Parse error";

/// A bookmark record as delivered by the feed.
///
/// Every field is optional on the wire. Missing, `null` or mistyped values
/// fall back to `None`, an empty string or an empty tag list, so one odd
/// record still renders alongside the rest.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct RawItem {
    /// Source URL.
    #[serde(rename = "u", default, deserialize_with = "lenient_opt_string")]
    pub url: Option<String>,
    /// Display title.
    #[serde(rename = "d", default, deserialize_with = "lenient_string")]
    pub description: String,
    /// Free-text note, often empty.
    #[serde(rename = "n", default, deserialize_with = "lenient_string")]
    pub note: String,
    /// Tags in feed order.
    #[serde(rename = "t", default, deserialize_with = "lenient_tags")]
    pub tags: Vec<String>,
}

fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_opt_string(deserializer).map(Option::unwrap_or_default)
}

/// Non-string entries are dropped; anything but an array means no tags.
fn lenient_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(values) => Ok(values
            .into_iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect()),
        _ => Ok(Vec::new()),
    }
}

/// A bookmark after normalization.
///
/// `location` is derived from `url` and is never supplied by the feed.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Item {
    pub url: String,
    pub description: String,
    pub note: String,
    pub tags: Vec<String>,
    pub location: String,
}

/// The user and the ordered tag filters for one request.
///
/// Holds at most [`MAX_FILTER_DEPTH`] tags. `FilterState::from_segments`
/// in the view module enforces the limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub user: String,
    pub applied_tags: Vec<String>,
}

/// Output of the item normalizer.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ResultBundle {
    /// Items in feed order.
    pub items: Vec<Item>,
    /// Tags available for further drill-down, sorted and unique.
    pub available_tags: Vec<String>,
    /// Distinct item locations, sorted and unique.
    pub locations: Vec<String>,
}

/// Everything the wishlist view needs to render one page.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RenderBundle {
    pub title: String,
    pub user: String,
    pub applied_tags: Vec<String>,
    pub items: Vec<Item>,
    pub available_tags: Vec<String>,
    pub locations: Vec<String>,
}

/// Everything the error view needs: a title and one fixed message.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorView {
    pub title: String,
    pub user: String,
    /// Stable cause key (`no_user`, `no_items`, `filter_limit_exceeded`).
    pub key: String,
    pub message: String,
}

/// The outcome of a request, always renderable.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Page {
    Wishlist(RenderBundle),
    Error(ErrorView),
}
