//! Atom 1.0 feed serialization.

use anyhow::Result;
use atom_syndication::{
    Entry, EntryBuilder, Feed, FeedBuilder, FixedDateTime, GeneratorBuilder, Link, LinkBuilder,
    Person, PersonBuilder, Text,
};

use super::FeedItem;
use crate::config::SiteConfig;
use crate::utils::date::DateTimeUtc;

/// Serialize the feed items as an Atom 1.0 document.
pub fn to_xml(config: &SiteConfig, items: &[FeedItem], base_url: &str) -> Result<String> {
    let base_url = base_url.trim_end_matches('/');

    let entries: Vec<Entry> = items
        .iter()
        .filter_map(|item| to_atom_entry(item, base_url))
        .collect();

    // Find the most recent update time for feed updated field
    // Compare by RFC3339 strings (lexicographically sortable for ISO dates)
    let updated_str = items
        .iter()
        .filter_map(|i| DateTimeUtc::parse(&i.date).map(DateTimeUtc::to_rfc3339))
        .max()
        .unwrap_or_else(|| "1970-01-01T00:00:00Z".to_string());

    let updated: FixedDateTime = updated_str
        .parse()
        .unwrap_or_else(|_| FixedDateTime::default());

    // Build author
    let author: Person = PersonBuilder::default()
        .name(config.site.info.author.clone())
        .email(Some(config.site.info.email.clone()))
        .build();

    // Build self link
    let self_link: Link = LinkBuilder::default()
        .href(format!("{}/{}", base_url, config.site.feed.path.display()))
        .rel("self".to_string())
        .mime_type(Some("application/atom+xml".to_string()))
        .build();

    // Build alternate link
    let alternate_link: Link = LinkBuilder::default()
        .href(base_url.to_string())
        .rel("alternate".to_string())
        .build();

    let feed: Feed = FeedBuilder::default()
        .title(Text::plain(config.site.info.title.clone()))
        .id(base_url)
        .updated(updated)
        .authors(vec![author])
        .links(vec![self_link, alternate_link])
        .subtitle(Some(Text::plain(config.site.info.description.clone())))
        .generator(Some(
            GeneratorBuilder::default()
                .value("brume")
                .uri(Some("https://github.com/brume-rs/brume".to_string()))
                .build(),
        ))
        .lang(config.site.info.language.clone())
        .entries(entries)
        .build();

    Ok(feed.to_string())
}

fn to_atom_entry(item: &FeedItem, base_url: &str) -> Option<Entry> {
    let updated_str = DateTimeUtc::parse(&item.date)?.to_rfc3339();
    let updated: FixedDateTime = updated_str.parse().ok()?;

    let link = item.url(base_url);

    // Build entry link
    let entry_link: Link = LinkBuilder::default()
        .href(&link)
        .rel("alternate".to_string())
        .build();

    // Build author if available
    let authors: Vec<Person> = item
        .author
        .as_ref()
        .map(|name| vec![PersonBuilder::default().name(name.clone()).build()])
        .unwrap_or_default();

    Some(
        EntryBuilder::default()
            .title(Text::plain(item.title.clone()))
            .id(&link)
            .updated(updated)
            .links(vec![entry_link])
            .summary(item.description.clone().map(Text::plain))
            .authors(authors)
            .build(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::UrlPath;

    fn make_config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.site.info.title = "Test Blog".to_string();
        config.site.info.description = "A test blog".to_string();
        config.site.info.author = "Test Author".to_string();
        config.site.info.email = "test@example.com".to_string();
        config.site.info.url = Some("https://example.com".to_string());
        config
    }

    #[test]
    fn test_to_atom_entry_basic() {
        let item = FeedItem {
            title: "Test Post".to_string(),
            date: "2024-01-15".to_string(),
            permalink: UrlPath::from_page("/blog/test/"),
            description: Some("A test summary".to_string()),
            author: Some("Post Author".to_string()),
        };

        let entry = to_atom_entry(&item, "https://example.com").expect("should create entry");
        assert_eq!(entry.title().as_str(), "Test Post");
        assert_eq!(entry.id(), "https://example.com/blog/test/");
        assert!(entry.updated().to_rfc3339().starts_with("2024-01-15"));
    }

    #[test]
    fn test_to_atom_entry_invalid_date() {
        let item = FeedItem {
            title: "Test Post".to_string(),
            date: "invalid-date".to_string(),
            permalink: UrlPath::from_page("/blog/test/"),
            description: None,
            author: None,
        };

        // Invalid date should return None
        assert!(to_atom_entry(&item, "https://example.com").is_none());
    }

    #[test]
    fn test_to_xml_empty() {
        let config = make_config();
        let xml = to_xml(&config, &[], "https://example.com").unwrap();

        assert!(xml.contains("<feed"));
        assert!(xml.contains("Test Blog"));
        assert!(!xml.contains("<entry>"));
    }
}
