//! Output generation for resolved pages.
//!
//! # Submodules
//!
//! - [`json`]: Serializes a [`Page`](crate::models::Page) to stdout or a file
//!
//! The JSON document is the render bundle handed to the view layer:
//!
//! ```text
//! {"kind": "wishlist", "title": ..., "user": ..., "appliedTags": [...],
//!  "items": [...], "availableTags": [...], "locations": [...]}
//! {"kind": "error", "title": ..., "user": ..., "key": ..., "message": ...}
//! ```

pub mod json;
