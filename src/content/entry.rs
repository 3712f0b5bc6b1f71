//! Entry metadata and the content entry type.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::UrlPath;
use crate::utils::date::DateTimeUtc;

/// Raw JSON object map for passthrough metadata.
pub type JsonMap = serde_json::Map<String, serde_json::Value>;

/// Deserialize tags, treating `null` as empty vec
fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<Vec<String>> = Option::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

/// Entry metadata from frontmatter in markdown files
///
/// # Standard Fields
///
/// | Field         | Type           | Description                    |
/// |---------------|----------------|--------------------------------|
/// | `title`       | `String`       | Entry title                    |
/// | `description` | `String`       | Short description/summary      |
/// | `date`        | `String`       | Publication date               |
/// | `updated`     | `String`       | Last update date               |
/// | `author`      | `String`       | Author name                    |
/// | `draft`       | `bool`         | Draft status (default: false)  |
/// | `tags`        | `Vec<String>`  | Categorization tags            |
///
/// # Custom Fields (`extra`)
///
/// Any additional frontmatter fields are captured in `extra` as raw JSON,
/// available to downstream consumers without a schema change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct EntryMeta {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub updated: Option<String>,
    pub author: Option<String>,
    #[serde(default)]
    pub draft: bool,
    /// Tags for categorizing the entry.
    #[serde(default, deserialize_with = "deserialize_tags")]
    pub tags: Vec<String>,
    /// Additional user-defined fields (raw JSON).
    #[serde(flatten, default)]
    pub extra: JsonMap,
}

/// A single entry of a content collection.
///
/// The id is the slug derived from the source file stem; the permalink is
/// `/{collection}/{id}/` and is deterministically derived from the id.
#[derive(Debug, Clone)]
pub struct ContentEntry {
    /// Unique id within the collection (URL slug).
    pub id: String,
    /// Absolute URL path, `/{collection}/{id}/`.
    pub permalink: UrlPath,
    /// Frontmatter metadata.
    pub meta: EntryMeta,
    /// Markdown body (frontmatter stripped).
    pub body: String,
    /// Source file the entry was read from.
    pub source: PathBuf,
}

impl ContentEntry {
    /// Get title, falling back to the id if not set.
    pub fn title(&self) -> &str {
        self.meta.title.as_deref().unwrap_or(&self.id)
    }

    /// Parsed publication date, if present and valid.
    pub fn date(&self) -> Option<DateTimeUtc> {
        self.meta.date.as_deref().and_then(DateTimeUtc::parse)
    }

    /// Check if this entry is a draft.
    #[inline]
    pub fn is_draft(&self) -> bool {
        self.meta.draft
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_meta_default() {
        let meta = EntryMeta::default();
        assert!(meta.title.is_none());
        assert!(!meta.draft);
        assert!(meta.tags.is_empty());
    }

    #[test]
    fn test_entry_meta_deserialize() {
        let json = r#"{"title": "Hello", "draft": true, "tags": ["rust", "web"]}"#;
        let meta: EntryMeta = serde_json::from_str(json).unwrap();
        assert_eq!(meta.title.as_deref(), Some("Hello"));
        assert!(meta.draft);
        assert_eq!(meta.tags, vec!["rust", "web"]);
    }

    #[test]
    fn test_entry_meta_extra_fields() {
        let json = r#"{"title": "Test", "hero_image": "cover.png", "number": 42}"#;
        let meta: EntryMeta = serde_json::from_str(json).unwrap();
        assert_eq!(
            meta.extra.get("hero_image").and_then(|v| v.as_str()),
            Some("cover.png")
        );
        assert_eq!(meta.extra.get("number").and_then(|v| v.as_i64()), Some(42));
    }

    #[test]
    fn test_entry_meta_null_tags() {
        let json = r#"{"tags": null}"#;
        let meta: EntryMeta = serde_json::from_str(json).unwrap();
        assert!(meta.tags.is_empty());
    }

    #[test]
    fn test_entry_title_fallback() {
        let entry = ContentEntry {
            id: "my-post".into(),
            permalink: UrlPath::from_page("/blog/my-post/"),
            meta: EntryMeta::default(),
            body: String::new(),
            source: PathBuf::new(),
        };
        assert_eq!(entry.title(), "my-post");
    }

    #[test]
    fn test_entry_date_parse() {
        let entry = ContentEntry {
            id: "a".into(),
            permalink: UrlPath::from_page("/blog/a/"),
            meta: EntryMeta {
                date: Some("2024-03-05".into()),
                ..Default::default()
            },
            body: String::new(),
            source: PathBuf::new(),
        };
        assert_eq!(entry.date(), Some(DateTimeUtc::from_ymd(2024, 3, 5)));
    }
}
