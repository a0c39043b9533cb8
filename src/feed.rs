//! Bookmark feed client.
//!
//! Builds the tag-filtered feed URL for a user, performs the fetch and parses
//! the JSON records. There is no retry and no timeout override: a failed
//! fetch is final for the request.
//!
//! # Architecture
//!
//! The transport sits behind a small trait so the client logic can run
//! against canned responses:
//! - [`FetchBody`]: Core trait, one GET returning the body of a successful response
//! - [`HttpFetcher`]: `reqwest`-backed implementation used in production
//!
//! # URL Shape
//!
//! ```text
//! {feed_base}/json/v1/u:{user}/t:want/t:{tag1}/t:{tag2}
//! ```
//!
//! The user and every tag are percent-encoded individually, since the feed
//! reads filters out of path segments.

use crate::error::FeedError;
use crate::models::{FilterState, RawItem, SENTINEL_TAG};
use crate::utils::truncate_for_log;
use serde::Deserialize;
use std::error::Error;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Boxed transport error.
pub type BoxError = Box<dyn Error + Send + Sync>;

/// Trait for the single GET the feed client performs.
///
/// Implementors return `Ok(Some(body))` for a successful response,
/// `Ok(None)` for any non-success status, and `Err` when the request never
/// completed (DNS, connection, TLS, body read).
pub trait FetchBody {
    async fn get_body(&self, url: &str) -> Result<Option<String>, BoxError>;
}

/// Production transport backed by a shared [`reqwest::Client`].
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FetchBody for HttpFetcher {
    #[instrument(level = "debug", skip_all, fields(%url))]
    async fn get_body(&self, url: &str) -> Result<Option<String>, BoxError> {
        let t0 = Instant::now();
        let response = self.client.get(url).send().await?;
        let status = response.status();
        debug!(%status, elapsed_ms = t0.elapsed().as_millis() as u128, "Feed responded");

        if !status.is_success() {
            return Ok(None);
        }
        Ok(Some(response.text().await?))
    }
}

/// Build the feed URL for `filter`.
///
/// # Arguments
///
/// * `feed_base` - Scheme and host of the feed, e.g. `http://feeds.pinboard.in`
/// * `filter` - The user and applied tags, in order
///
/// # Examples
///
/// ```ignore
/// let filter = FilterState { user: "bob".into(), applied_tags: vec!["c++".into()] };
/// assert_eq!(
///     feed_url("http://feeds.pinboard.in/", &filter),
///     "http://feeds.pinboard.in/json/v1/u:bob/t:want/t:c%2B%2B"
/// );
/// ```
pub fn feed_url(feed_base: &str, filter: &FilterState) -> String {
    let mut url = format!(
        "{}/json/v1/u:{}/t:{}",
        feed_base.trim_end_matches('/'),
        urlencoding::encode(&filter.user),
        SENTINEL_TAG
    );
    for tag in &filter.applied_tags {
        url.push_str("/t:");
        url.push_str(&urlencoding::encode(tag));
    }
    url
}

/// Parse a feed body into records.
///
/// The body must be a JSON array. Entries that are not objects are skipped;
/// fields inside an object are read leniently by [`RawItem`].
pub fn parse_payload(body: &str) -> Result<Vec<RawItem>, serde_json::Error> {
    let records: Vec<serde_json::Value> = serde_json::from_str(body)?;
    let items = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match RawItem::deserialize(record) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!(index, error = %e, "Skipping unreadable feed record");
                None
            }
        })
        .collect();
    Ok(items)
}

/// Fetch the want-tagged records for `filter`.
///
/// # Returns
///
/// The records in feed order, or:
/// - [`FeedError::NotFound`] for a non-success status or an empty body
/// - [`FeedError::Transient`] for a transport failure or a malformed payload
#[instrument(level = "info", skip_all, fields(user = %filter.user, tags = ?filter.applied_tags))]
pub async fn fetch_items<F: FetchBody>(
    fetcher: &F,
    feed_base: &str,
    filter: &FilterState,
) -> Result<Vec<RawItem>, FeedError> {
    let url = feed_url(feed_base, filter);
    debug!(%url, "Fetching feed");

    let body = match fetcher.get_body(&url).await {
        Ok(Some(body)) => body,
        Ok(None) => {
            info!("Feed returned a non-success status");
            return Err(FeedError::NotFound);
        }
        Err(e) => {
            warn!(error = %e, "Feed request failed");
            return Err(FeedError::Transient(e.to_string()));
        }
    };

    if body.trim().is_empty() {
        info!("Feed returned an empty body");
        return Err(FeedError::NotFound);
    }

    match parse_payload(&body) {
        Ok(items) => {
            info!(count = items.len(), "Fetched feed items");
            Ok(items)
        }
        Err(e) => {
            warn!(
                error = %e,
                body_preview = %truncate_for_log(&body, 300),
                "Feed payload is not a list of records"
            );
            Err(FeedError::Transient(e.to_string()))
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Canned transport that records the URLs it was asked for.
    #[derive(Debug)]
    pub(crate) struct StubFetcher {
        response: Result<Option<String>, String>,
        pub(crate) requested: Mutex<Vec<String>>,
    }

    impl StubFetcher {
        pub(crate) fn body(body: &str) -> Self {
            Self {
                response: Ok(Some(body.to_string())),
                requested: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn status_error() -> Self {
            Self {
                response: Ok(None),
                requested: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn connection_error() -> Self {
            Self {
                response: Err("connection refused".to_string()),
                requested: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn calls(&self) -> usize {
            self.requested.lock().unwrap().len()
        }
    }

    impl FetchBody for StubFetcher {
        async fn get_body(&self, url: &str) -> Result<Option<String>, BoxError> {
            self.requested.lock().unwrap().push(url.to_string());
            match &self.response {
                Ok(body) => Ok(body.clone()),
                Err(e) => Err(e.clone().into()),
            }
        }
    }

    fn filter(user: &str, tags: &[&str]) -> FilterState {
        FilterState {
            user: user.to_string(),
            applied_tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    const BASE: &str = "http://feeds.example.test";

    #[test]
    fn test_feed_url_without_tags() {
        assert_eq!(
            feed_url(BASE, &filter("bob", &[])),
            "http://feeds.example.test/json/v1/u:bob/t:want"
        );
    }

    #[test]
    fn test_feed_url_with_tags_in_order() {
        assert_eq!(
            feed_url("http://feeds.example.test/", &filter("bob", &["books", "fiction"])),
            "http://feeds.example.test/json/v1/u:bob/t:want/t:books/t:fiction"
        );
    }

    #[test]
    fn test_feed_url_encodes_reserved_characters() {
        let url = feed_url(BASE, &filter("a/b?c", &["c++", "sci fi", "x#y"]));
        assert_eq!(
            url,
            "http://feeds.example.test/json/v1/u:a%2Fb%3Fc/t:want/t:c%2B%2B/t:sci%20fi/t:x%23y"
        );
    }

    #[tokio::test]
    async fn test_fetch_items_parses_records() {
        let stub = StubFetcher::body(r#"[{"u":"http://a.example.com/x","d":"Widget","n":"","t":["want","gift"]}]"#);
        let items = fetch_items(&stub, BASE, &filter("bob", &["gift"])).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].description, "Widget");
        assert_eq!(
            stub.requested.lock().unwrap()[0],
            "http://feeds.example.test/json/v1/u:bob/t:want/t:gift"
        );
    }

    #[tokio::test]
    async fn test_fetch_items_empty_list_is_not_not_found() {
        let stub = StubFetcher::body("[]");
        let items = fetch_items(&stub, BASE, &filter("bob", &[])).await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_items_empty_body_is_not_found() {
        for tags in [&[][..], &["books"][..], &["books", "fiction"][..]] {
            let stub = StubFetcher::body("");
            let result = fetch_items(&stub, BASE, &filter("ghost", tags)).await;
            assert_eq!(result, Err(FeedError::NotFound));
        }
    }

    #[tokio::test]
    async fn test_fetch_items_whitespace_body_is_not_found() {
        let stub = StubFetcher::body("  \n");
        let result = fetch_items(&stub, BASE, &filter("ghost", &[])).await;
        assert_eq!(result, Err(FeedError::NotFound));
    }

    #[tokio::test]
    async fn test_fetch_items_status_error_is_not_found() {
        let stub = StubFetcher::status_error();
        let result = fetch_items(&stub, BASE, &filter("bob", &[])).await;
        assert_eq!(result, Err(FeedError::NotFound));
    }

    #[tokio::test]
    async fn test_fetch_items_connection_error_is_transient() {
        let stub = StubFetcher::connection_error();
        let result = fetch_items(&stub, BASE, &filter("bob", &[])).await;
        assert!(matches!(result, Err(FeedError::Transient(_))));
        assert_eq!(stub.calls(), 1);
    }

    #[test]
    fn test_parse_payload_skips_non_object_records() {
        let items = parse_payload(r#"[{"u":"http://a.com","d":"A","n":"","t":[]}, 42, "loose"]"#).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].description, "A");
    }

    #[tokio::test]
    async fn test_fetch_items_keeps_records_beside_a_bad_one() {
        let stub = StubFetcher::body(
            r#"[{"u":"http://a.example.com/x","d":"Widget","n":"","t":["want","gift"]},{"u":42,"d":"Bad","n":"","t":["want"]}]"#,
        );
        let items = fetch_items(&stub, BASE, &filter("bob", &[])).await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].url, None);
        assert_eq!(items[1].description, "Bad");
    }

    #[tokio::test]
    async fn test_fetch_items_malformed_json_is_transient() {
        for body in ["<html>oops</html>", r#"{"u":"http://a.com"}"#, "[{\"u\": "] {
            let stub = StubFetcher::body(body);
            let result = fetch_items(&stub, BASE, &filter("bob", &[])).await;
            assert!(matches!(result, Err(FeedError::Transient(_))), "body: {body}");
        }
    }
}
