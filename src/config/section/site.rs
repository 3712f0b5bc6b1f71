//! `[site]` section configuration.
//!
//! Contains site metadata and site-level features.
//!
//! # Example
//!
//! ```toml
//! [site.info]
//! title = "Matthias Weiss"
//! description = "Notes on software and other things"
//! author = "Matthias Weiss"
//! email = "hi@matthiasweiss.at"
//! url = "https://matthiasweiss.at"
//!
//! [site.feed]
//! enable = true
//! path = "rss.xml"
//!
//! [site.sitemap]
//! enable = true
//! ```

use crate::config::types::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// [site]
// ============================================================================

/// Site section configuration containing info and site-level features.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSectionConfig {
    /// Site metadata (title, author, description, url).
    pub info: SiteInfoConfig,

    /// Feed generation settings (RSS/Atom).
    pub feed: FeedConfig,

    /// Sitemap generation settings.
    pub sitemap: SitemapConfig,
}

// ============================================================================
// [site.info]
// ============================================================================

/// Site metadata for feed generation and page rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteInfoConfig {
    /// Site title.
    pub title: String,

    /// Author name.
    pub author: String,

    /// Author email.
    pub email: String,

    /// Site description.
    pub description: String,

    /// Production site URL (e.g., "https://matthiasweiss.at").
    pub url: Option<String>,

    /// Language code (e.g., "en", "de-AT").
    pub language: String,
}

/// Field paths for `[site.info]` diagnostics.
pub struct SiteInfoFields {
    pub title: FieldPath,
    pub description: FieldPath,
    pub url: FieldPath,
}

impl SiteInfoConfig {
    pub const FIELDS: SiteInfoFields = SiteInfoFields {
        title: FieldPath::new("site.info.title"),
        description: FieldPath::new("site.info.description"),
        url: FieldPath::new("site.info.url"),
    };

    /// Validate site configuration.
    ///
    /// # Checks
    /// - If `feed_enabled`, `url` must be set
    /// - `url` must be a valid URL with scheme (e.g., `https://example.com`)
    pub fn validate(&self, feed_enabled: bool, diag: &mut ConfigDiagnostics) {
        // Feed requires url
        if feed_enabled && self.url.is_none() {
            diag.error_with_hint(
                Self::FIELDS.url,
                format!(
                    "{} is enabled but {} is not configured",
                    FeedConfig::FIELDS.enable,
                    Self::FIELDS.url
                ),
                format!("set {}, e.g.: \"https://example.com\"", Self::FIELDS.url),
            );
        }

        // URL format check using url crate for strict validation
        if let Some(url_str) = &self.url {
            match url::Url::parse(url_str) {
                Ok(parsed) => {
                    // Must be http or https
                    if !matches!(parsed.scheme(), "http" | "https") {
                        diag.error_with_hint(
                            Self::FIELDS.url,
                            format!(
                                "scheme '{}' not supported, must be http or https",
                                parsed.scheme()
                            ),
                            "use format like https://example.com",
                        );
                    }
                    // Must have a valid host
                    if parsed.host_str().is_none() {
                        diag.error_with_hint(
                            Self::FIELDS.url,
                            "URL must have a valid host",
                            "use format like https://example.com",
                        );
                    }
                }
                Err(e) => {
                    diag.error_with_hint(
                        Self::FIELDS.url,
                        format!("invalid URL: {}", e),
                        "use format like https://example.com",
                    );
                }
            }
        }
    }
}

impl Default for SiteInfoConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            email: String::new(),
            description: String::new(),
            url: None,
            language: "en".into(),
        }
    }
}

// ============================================================================
// [site.feed]
// ============================================================================

/// Feed output format.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FeedFormat {
    /// RSS 2.0 format (default).
    #[default]
    Rss,
    /// Atom 1.0 format.
    Atom,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Enable feed generation.
    pub enable: bool,
    /// Output path for the feed file, relative to the output directory.
    pub path: PathBuf,
    /// Feed format: rss | atom.
    pub format: FeedFormat,
}

/// Field paths for `[site.feed]` diagnostics.
pub struct FeedFields {
    pub enable: FieldPath,
    pub path: FieldPath,
}

impl FeedConfig {
    pub const FIELDS: FeedFields = FeedFields {
        enable: FieldPath::new("site.feed.enable"),
        path: FieldPath::new("site.feed.path"),
    };

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.enable && self.path.as_os_str().is_empty() {
            diag.error_with_hint(
                Self::FIELDS.path,
                format!(
                    "{} is enabled but {} is empty",
                    Self::FIELDS.enable,
                    Self::FIELDS.path
                ),
                "use a filename like \"rss.xml\"",
            );
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            enable: true,
            path: "rss.xml".into(),
            format: FeedFormat::Rss,
        }
    }
}

// ============================================================================
// [site.sitemap]
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SitemapConfig {
    /// Enable sitemap generation.
    pub enable: bool,
    /// Output path for the sitemap file, relative to the output directory.
    pub path: PathBuf,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            enable: true,
            path: "sitemap.xml".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert!(config.site.feed.enable);
        assert_eq!(config.site.feed.path, PathBuf::from("rss.xml"));
        assert_eq!(config.site.feed.format, FeedFormat::Rss);
        assert!(config.site.sitemap.enable);
        assert_eq!(config.site.sitemap.path, PathBuf::from("sitemap.xml"));
        assert_eq!(config.site.info.language, "en");
    }

    #[test]
    fn test_custom_feed_config() {
        let config =
            test_parse_config("[site.feed]\nenable = false\npath = \"feed.xml\"\nformat = \"atom\"");
        assert!(!config.site.feed.enable);
        assert_eq!(config.site.feed.path, PathBuf::from("feed.xml"));
        assert_eq!(config.site.feed.format, FeedFormat::Atom);
    }

    #[test]
    fn test_info_validate_feed_requires_url() {
        let mut config = test_parse_config("");
        config.site.info.url = None;

        let mut diag = ConfigDiagnostics::new();
        config.site.info.validate(true, &mut diag);
        assert!(diag.has_errors());

        let mut diag = ConfigDiagnostics::new();
        config.site.info.validate(false, &mut diag);
        assert!(!diag.has_errors());
    }

    #[test]
    fn test_info_validate_url_scheme() {
        let mut config = test_parse_config("");
        config.site.info.url = Some("ftp://example.com".into());

        let mut diag = ConfigDiagnostics::new();
        config.site.info.validate(false, &mut diag);
        assert!(diag.has_errors());

        config.site.info.url = Some("https://matthiasweiss.at".into());
        let mut diag = ConfigDiagnostics::new();
        config.site.info.validate(true, &mut diag);
        assert!(!diag.has_errors());
    }
}
