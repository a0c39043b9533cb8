//! Request boundary: path segments in, a renderable [`Page`] out.
//!
//! Resolution runs in three steps:
//! 1. **Filter**: turn the user and tag segments into a [`FilterState`],
//!    rejecting more tags than the feed can filter on
//! 2. **Fetch**: ask the feed for the user's want-tagged records
//! 3. **Normalize**: build the [`RenderBundle`] for the wishlist view
//!
//! Every failure along the way ends as an [`ErrorView`]; nothing here returns
//! an error to the caller.

use crate::config::WishboardConfig;
use crate::error::ViewError;
use crate::feed::{FetchBody, fetch_items};
use crate::models::{ErrorView, FilterState, MAX_FILTER_DEPTH, Page, RenderBundle};
use crate::normalize::normalize;
use tracing::{info, instrument};

impl FilterState {
    /// Build the filter for a request path `/{user}/{tag1}/{tag2}`.
    ///
    /// Segments are trimmed and empty ones dropped, so a trailing slash does
    /// not count as a filter.
    pub fn from_segments(user: &str, segments: &[String]) -> Result<Self, ViewError> {
        let user = user.trim();
        if user.is_empty() {
            return Err(ViewError::NoUser);
        }

        let applied_tags: Vec<String> = segments
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        if applied_tags.len() > MAX_FILTER_DEPTH {
            return Err(ViewError::FilterLimitExceeded);
        }

        Ok(Self {
            user: user.to_string(),
            applied_tags,
        })
    }
}

/// Page title: `"{user}'s {site}"`, followed by ` - [tag]` per applied tag.
pub fn page_title(site_name: &str, user: &str, applied_tags: &[String]) -> String {
    if user.is_empty() {
        return site_name.to_string();
    }
    let mut title = format!("{user}'s {site_name}");
    if !applied_tags.is_empty() {
        let tags = applied_tags
            .iter()
            .map(|t| format!("[{t}]"))
            .collect::<Vec<_>>()
            .join(" ");
        title.push_str(" - ");
        title.push_str(&tags);
    }
    title
}

fn error_page(config: &WishboardConfig, user: &str, applied_tags: &[String], cause: ViewError) -> Page {
    info!(key = cause.key(), %user, "Rendering error page");
    Page::Error(ErrorView {
        title: page_title(&config.site_name, user, applied_tags),
        user: user.to_string(),
        key: cause.key().to_string(),
        message: cause.message(),
    })
}

/// Resolve one request into a wishlist page or an error page.
///
/// # Arguments
///
/// * `fetcher` - Transport used for the single feed request
/// * `config` - Feed base and site name
/// * `user` - The user path segment
/// * `segments` - Tag path segments after the user, in order
#[instrument(level = "info", skip(fetcher, config))]
pub async fn resolve<F: FetchBody>(
    fetcher: &F,
    config: &WishboardConfig,
    user: &str,
    segments: &[String],
) -> Page {
    let filter = match FilterState::from_segments(user, segments) {
        Ok(filter) => filter,
        Err(cause) => return error_page(config, user.trim(), &[], cause),
    };

    let raw_items = match fetch_items(fetcher, &config.feed_base, &filter).await {
        Ok(raw_items) => raw_items,
        Err(e) => return error_page(config, &filter.user, &filter.applied_tags, e.into()),
    };

    let bundle = normalize(&raw_items, &filter.applied_tags);
    if bundle.items.is_empty() {
        return error_page(config, &filter.user, &filter.applied_tags, ViewError::NoItems);
    }

    info!(
        items = bundle.items.len(),
        available_tags = bundle.available_tags.len(),
        locations = bundle.locations.len(),
        "Resolved wishlist"
    );

    Page::Wishlist(RenderBundle {
        title: page_title(&config.site_name, &filter.user, &filter.applied_tags),
        user: filter.user,
        applied_tags: filter.applied_tags,
        items: bundle.items,
        available_tags: bundle.available_tags,
        locations: bundle.locations,
    })
}
