//! Sitemap generation.
//!
//! Generates a sitemap.xml listing the fixed route table and every
//! published entry for search engine indexing.
//!
//! # Sitemap Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/</loc>
//!     <lastmod>2025-01-01</lastmod>
//!   </url>
//! </urlset>
//! ```

use anyhow::{Context, Result};
use std::borrow::Cow;
use std::fs;

use crate::config::SiteConfig;
use crate::content::Collection;
use crate::core::Route;
use crate::generator::minify_xml;
use crate::log;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Build sitemap if enabled.
pub fn build_sitemap(config: &SiteConfig, collection: &Collection, base_url: &str) -> Result<()> {
    if config.site.sitemap.enable {
        let sitemap = Sitemap::build(collection, base_url);
        sitemap.write(config)?;
    }
    Ok(())
}

struct Sitemap {
    urls: Vec<UrlEntry>,
}

struct UrlEntry {
    loc: String,
    lastmod: Option<String>,
}

impl Sitemap {
    fn build(collection: &Collection, base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/');

        // Fixed routes first, then collection entries
        let mut urls: Vec<UrlEntry> = Route::ALL
            .iter()
            .map(|route| UrlEntry {
                loc: format!("{}{}", base_url, route.path()),
                lastmod: None,
            })
            .collect();

        urls.extend(collection.published().map(|entry| UrlEntry {
            loc: format!("{}{}", base_url, entry.permalink.to_encoded()),
            lastmod: entry.meta.date.clone(),
        }));

        Self { urls }
    }

    fn into_xml(self) -> String {
        let mut xml = String::with_capacity(4096);

        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str("<urlset xmlns=\"");
        xml.push_str(SITEMAP_NS);
        xml.push_str("\">\n");

        for entry in self.urls {
            xml.push_str("  <url>\n    <loc>");
            xml.push_str(&escape_xml(&entry.loc));
            xml.push_str("</loc>\n");
            if let Some(lastmod) = entry.lastmod {
                xml.push_str("    <lastmod>");
                xml.push_str(&lastmod);
                xml.push_str("</lastmod>\n");
            }
            xml.push_str("  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }

    fn write(self, config: &SiteConfig) -> Result<()> {
        let sitemap_path = config.build.output.join(&config.site.sitemap.path);
        let xml = self.into_xml();
        let xml = minify_xml(xml.as_bytes(), config.build.minify);

        if let Some(parent) = sitemap_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&sitemap_path, &*xml)
            .with_context(|| format!("Failed to write sitemap to {}", sitemap_path.display()))?;

        log!("sitemap"; "{}", sitemap_path.file_name().unwrap_or_default().to_string_lossy());
        Ok(())
    }
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> Cow<'_, str> {
    // Fast path: check if escaping is needed
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    Cow::Owned(
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("hello"), "hello");
        assert_eq!(escape_xml("<test>"), "&lt;test&gt;");
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml(r#"say "hi""#), "say &quot;hi&quot;");
        assert_eq!(escape_xml("it's"), "it&apos;s");
    }

    #[test]
    fn test_sitemap_routes_only() {
        let collection = Collection::default();
        let sitemap = Sitemap::build(&collection, "https://example.com");
        let xml = sitemap.into_xml();

        assert!(xml.contains(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#)));
        // The fixed route table is always present
        assert!(xml.contains("<loc>https://example.com/</loc>"));
        assert!(xml.contains("<loc>https://example.com/work</loc>"));
        assert!(xml.contains("<loc>https://example.com/blog</loc>"));
        assert_eq!(xml.matches("<url>").count(), 3);
    }

    #[test]
    fn test_sitemap_escapes_special_chars() {
        let sitemap = Sitemap {
            urls: vec![UrlEntry {
                loc: "https://example.com/search?q=a&b=c".to_string(),
                lastmod: None,
            }],
        };
        let xml = sitemap.into_xml();

        assert!(xml.contains("<loc>https://example.com/search?q=a&amp;b=c</loc>"));
    }

    #[test]
    fn test_sitemap_lastmod() {
        let sitemap = Sitemap {
            urls: vec![
                UrlEntry {
                    loc: "https://example.com/blog/hello/".to_string(),
                    lastmod: Some("2025-01-01".to_string()),
                },
                UrlEntry {
                    loc: "https://example.com/about/".to_string(),
                    lastmod: None,
                },
            ],
        };
        let xml = sitemap.into_xml();

        assert!(xml.contains("<lastmod>2025-01-01</lastmod>"));
        assert_eq!(xml.matches("<lastmod>").count(), 1);
    }

    #[test]
    fn test_sitemap_xml_structure() {
        let sitemap = Sitemap {
            urls: vec![UrlEntry {
                loc: "https://example.com/".to_string(),
                lastmod: Some("2025-01-01".to_string()),
            }],
        };
        let xml = sitemap.into_xml();

        let lines: Vec<&str> = xml.lines().collect();
        assert_eq!(lines[0], r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        assert!(lines[1].starts_with("<urlset"));
        assert!(lines.last().unwrap().trim() == "</urlset>");
    }

    #[test]
    fn test_sitemap_includes_collection_entries() {
        use std::fs;
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("hello.md"),
            "---\ntitle: Hello\ndate: 2024-06-01\n---\nbody",
        )
        .unwrap();

        let collection = Collection::load("blog", dir.path()).unwrap();
        let xml = Sitemap::build(&collection, "https://example.com").into_xml();

        assert!(xml.contains("<loc>https://example.com/blog/hello/</loc>"));
        assert!(xml.contains("<lastmod>2024-06-01</lastmod>"));
        assert_eq!(xml.matches("<url>").count(), 4); // 3 routes + 1 entry
    }
}
