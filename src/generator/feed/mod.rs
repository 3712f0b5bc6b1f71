//! Feed generation (RSS, Atom).
//!
//! Maps the blog collection to feed items and serializes a syndication
//! document:
//!
//! - **RSS 2.0**: Standard feed format (default, `rss.xml`)
//! - **Atom 1.0**: Modern feed format
//!
//! Items keep the collection's order; the feed does not resort entries.

mod atom;
mod rss;

use std::fs;
use std::path::PathBuf;

use anyhow::Result;

use crate::config::{FeedFormat, SiteConfig};
use crate::content::{Collection, ContentEntry};
use crate::core::UrlPath;
use crate::generator::minify_xml;
use crate::log;

/// Build feed if enabled in config (RSS or Atom based on format setting).
pub fn build_feed(config: &SiteConfig, collection: &Collection, base_url: &str) -> Result<()> {
    if !config.site.feed.enable {
        return Ok(());
    }

    let items = collect_feed_items(collection);
    let xml = match config.site.feed.format {
        FeedFormat::Rss => rss::to_xml(config, &items, base_url)?,
        FeedFormat::Atom => atom::to_xml(config, &items, base_url)?,
    };

    write_feed(config, &xml)
}

/// An entry validated for feed inclusion (requires title and date).
#[derive(Debug, Clone)]
pub struct FeedItem {
    pub title: String,
    pub date: String,
    pub permalink: UrlPath,
    pub description: Option<String>,
    pub author: Option<String>,
}

impl FeedItem {
    fn from_entry(entry: &ContentEntry) -> Option<Self> {
        Some(Self {
            title: entry.meta.title.clone()?,
            date: entry.meta.date.clone()?,
            permalink: entry.permalink.clone(),
            description: entry.meta.description.clone(),
            author: entry.meta.author.clone(),
        })
    }

    /// Absolute URL for this item.
    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.permalink.to_encoded())
    }
}

/// Map published entries to feed items, preserving collection order.
pub fn collect_feed_items(collection: &Collection) -> Vec<FeedItem> {
    let mut total = 0usize;
    let items: Vec<FeedItem> = collection
        .published()
        .inspect(|_| total += 1)
        .filter_map(FeedItem::from_entry)
        .collect();

    // Log excluded entries count (strict filtering: title + date required)
    let excluded = total - items.len();
    if excluded > 0 {
        log!("feed"; "excluded {} entries without title or date", excluded);
    }

    items
}

/// Write the serialized feed document to the configured path.
fn write_feed(config: &SiteConfig, xml: &str) -> Result<()> {
    let xml = minify_xml(xml.as_bytes(), config.build.minify);
    let feed_path = feed_output_path(config);

    if let Some(parent) = feed_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&feed_path, &*xml)?;

    log!("feed"; "{}", feed_path.file_name().unwrap_or_default().to_string_lossy());
    Ok(())
}

/// Feed path resolved against the output directory.
pub fn feed_output_path(config: &SiteConfig) -> PathBuf {
    config.build.output.join(&config.site.feed.path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_item_from_entry_requires_title_and_date() {
        use crate::content::EntryMeta;

        let entry = ContentEntry {
            id: "a".into(),
            permalink: UrlPath::from_page("/blog/a/"),
            meta: EntryMeta {
                title: Some("T1".into()),
                ..Default::default()
            },
            body: String::new(),
            source: Default::default(),
        };
        // No date -> excluded
        assert!(FeedItem::from_entry(&entry).is_none());
    }

    #[test]
    fn test_feed_item_url() {
        let item = FeedItem {
            title: "T".into(),
            date: "2024-01-01".into(),
            permalink: UrlPath::from_page("/blog/a/"),
            description: None,
            author: None,
        };
        assert_eq!(item.url("https://example.com"), "https://example.com/blog/a/");
        assert_eq!(item.url("https://example.com/"), "https://example.com/blog/a/");
    }
}
