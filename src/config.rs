//! Runtime configuration.
//!
//! Settings come from an optional YAML file; every key has a default so the
//! file may be omitted entirely or list only what it overrides.
//!
//! ```yaml
//! feed_base: http://feeds.pinboard.in
//! site_name: Wishboard
//! ```

use serde::{Deserialize, Serialize};
use std::error::Error;
use tracing::{info, instrument};

pub const DEFAULT_FEED_BASE: &str = "http://feeds.pinboard.in";
pub const DEFAULT_SITE_NAME: &str = "Wishboard";

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct WishboardConfig {
    /// Scheme and host of the bookmark feed.
    pub feed_base: String,
    /// Name used in page titles.
    pub site_name: String,
}

impl Default for WishboardConfig {
    fn default() -> Self {
        Self {
            feed_base: DEFAULT_FEED_BASE.to_string(),
            site_name: DEFAULT_SITE_NAME.to_string(),
        }
    }
}

/// Parse a configuration document. An empty document yields the defaults.
pub fn parse_config(yaml: &str) -> Result<WishboardConfig, serde_yaml::Error> {
    if yaml.trim().is_empty() {
        return Ok(WishboardConfig::default());
    }
    serde_yaml::from_str(yaml)
}

/// Load configuration from `path`, or the defaults when no path is given.
#[instrument(level = "info")]
pub async fn load_config(path: Option<&str>) -> Result<WishboardConfig, Box<dyn Error>> {
    let Some(path) = path else {
        return Ok(WishboardConfig::default());
    };
    let yaml = tokio::fs::read_to_string(path).await?;
    let config = parse_config(&yaml)?;
    info!(feed_base = %config.feed_base, site_name = %config.site_name, "Loaded configuration");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        assert_eq!(parse_config("").unwrap(), WishboardConfig::default());
    }

    #[test]
    fn test_partial_document_keeps_other_defaults() {
        let config = parse_config("feed_base: http://localhost:8080\n").unwrap();
        assert_eq!(config.feed_base, "http://localhost:8080");
        assert_eq!(config.site_name, DEFAULT_SITE_NAME);
    }

    #[test]
    fn test_full_document() {
        let config = parse_config("feed_base: http://feeds.example.test\nsite_name: Wants\n").unwrap();
        assert_eq!(config.feed_base, "http://feeds.example.test");
        assert_eq!(config.site_name, "Wants");
    }

    #[test]
    fn test_invalid_document_is_an_error() {
        assert!(parse_config("feed_base: [unclosed").is_err());
    }

    #[tokio::test]
    async fn test_load_config_without_path() {
        let config = load_config(None).await.unwrap();
        assert_eq!(config.feed_base, DEFAULT_FEED_BASE);
    }

    #[tokio::test]
    async fn test_load_config_from_file() {
        let path = std::env::temp_dir().join(format!("wishboard-config-{}.yaml", std::process::id()));
        tokio::fs::write(&path, "site_name: Gift Ideas\n").await.unwrap();
        let config = load_config(path.to_str()).await.unwrap();
        let _ = tokio::fs::remove_file(&path).await;
        assert_eq!(config.site_name, "Gift Ideas");
        assert_eq!(config.feed_base, DEFAULT_FEED_BASE);
    }

    #[tokio::test]
    async fn test_load_config_missing_file() {
        assert!(load_config(Some("/nonexistent/wishboard.yaml")).await.is_err());
    }
}
