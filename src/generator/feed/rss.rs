//! RSS 2.0 feed serialization.
//!
//! Channel metadata comes from `[site.info]`; items come from the blog
//! collection in collection order.

use std::sync::LazyLock;

use anyhow::{Result, anyhow};
use regex::Regex;
use rss::{ChannelBuilder, GuidBuilder, ItemBuilder, validation::Validate};

use super::FeedItem;
use crate::config::SiteConfig;
use crate::utils::date::DateTimeUtc;

/// Serialize the feed items as an RSS 2.0 document.
///
/// An empty item list still produces a valid zero-item channel.
pub fn to_xml(config: &SiteConfig, items: &[FeedItem], base_url: &str) -> Result<String> {
    let rss_items: Vec<_> = items
        .iter()
        .filter_map(|item| to_rss_item(item, config, base_url))
        .collect();

    let channel = ChannelBuilder::default()
        .title(&config.site.info.title)
        .link(base_url)
        .description(&config.site.info.description)
        .language(config.site.info.language.clone())
        .generator("brume".to_string())
        .items(rss_items)
        .build();

    channel
        .validate()
        .map_err(|e| anyhow!("RSS validation failed: {e}"))?;
    Ok(channel.to_string())
}

fn to_rss_item(item: &FeedItem, config: &SiteConfig, base_url: &str) -> Option<rss::Item> {
    let pub_date = DateTimeUtc::parse(&item.date).map(DateTimeUtc::to_rfc2822)?;
    let link = item.url(base_url);
    let author = normalize_rss_author(item.author.as_ref(), config);

    Some(
        ItemBuilder::default()
            .title(item.title.clone())
            .link(Some(link.clone()))
            .guid(GuidBuilder::default().permalink(true).value(link).build())
            .description(item.description.clone())
            .pub_date(pub_date)
            .author(author)
            .build(),
    )
}

/// Normalize author field to RSS format: "email (Name)"
fn normalize_rss_author(author: Option<&String>, config: &SiteConfig) -> Option<String> {
    static RE_VALID_AUTHOR: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}[ \t]*\([^)]+\)$").unwrap()
    });

    let author = author?;

    // Check if entry author is already valid
    if RE_VALID_AUTHOR.is_match(author) {
        return Some(author.clone());
    }

    // Try site config author
    let site_author = &config.site.info.author;
    if RE_VALID_AUTHOR.is_match(site_author) {
        return Some(site_author.clone());
    }

    // Combine email and author name
    Some(format!("{} ({})", config.site.info.email, site_author))
}
