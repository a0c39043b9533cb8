//! Error taxonomy for feed fetching and page resolution.
//!
//! Two layers of errors exist:
//! - [`FeedError`]: what went wrong talking to the feed
//! - [`ViewError`]: which fixed message the error page shows
//!
//! Every [`FeedError`] folds into a [`ViewError`] at the request boundary,
//! so no fetch failure ever escapes as a crash.

use thiserror::Error;

/// Outcome of a failed feed fetch.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FeedError {
    /// Non-success status or an empty body. The feed answers unknown users
    /// with an empty body rather than a distinct status.
    #[error("feed returned nothing for this user")]
    NotFound,

    /// Network failure or a payload that is not a list of records.
    #[error("feed request failed: {0}")]
    Transient(String),
}

/// Cause of an error page. Each variant maps to one fixed message.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ViewError {
    #[error("user does not exist.")]
    NoUser,

    #[error("nothing tagged as wanted (with these filters).")]
    NoItems,

    #[error("only two tags can be filtered at once.")]
    FilterLimitExceeded,
}

impl ViewError {
    /// Stable key the view layer uses to pick its copy.
    pub fn key(&self) -> &'static str {
        match self {
            ViewError::NoUser => "no_user",
            ViewError::NoItems => "no_items",
            ViewError::FilterLimitExceeded => "filter_limit_exceeded",
        }
    }

    /// Human-readable message for the error page.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl From<FeedError> for ViewError {
    fn from(e: FeedError) -> Self {
        match e {
            FeedError::NotFound => ViewError::NoUser,
            // Users see the same page as an empty wishlist.
            FeedError::Transient(_) => ViewError::NoItems,
        }
    }
}
