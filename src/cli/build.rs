//! Build command: render the collection and generate feed + sitemap.

use std::fs;

use anyhow::{Context, Result};
use rayon::prelude::*;

use crate::config::SiteConfig;
use crate::content::{BLOG_COLLECTION, Collection, ContentEntry};
use crate::core::{BuildMode, UrlPath};
use crate::generator::{feed::build_feed, sitemap::build_sitemap};
use crate::log;
use crate::logger::ProgressLine;
use crate::render::{MarkdownOptions, from_markdown, render_entry_page, render_index_page};

/// Build pages and generate feed/sitemap in parallel.
pub fn build_all(config: &SiteConfig, mode: BuildMode) -> Result<()> {
    let collection = build_site(config, mode)?;

    let base_url = config.base_url(mode);
    let (feed_result, sitemap_result) = rayon::join(
        || build_feed(config, &collection, &base_url),
        || build_sitemap(config, &collection, &base_url),
    );

    feed_result?;
    sitemap_result?;
    Ok(())
}

/// Render the blog collection into the output directory.
///
/// Returns the loaded collection for feed/sitemap generation.
pub fn build_site(config: &SiteConfig, mode: BuildMode) -> Result<Collection> {
    prepare_output_dir(config)?;

    let collection_dir = config.build.content.join(BLOG_COLLECTION);
    let collection = Collection::load(BLOG_COLLECTION, &collection_dir)?;

    let entries: Vec<&ContentEntry> = if config.build.drafts {
        collection.entries().iter().collect()
    } else {
        collection.published().collect()
    };

    // +1 for the blog index page
    let progress = ProgressLine::new(&[("pages", entries.len() + 1)]);
    let options = MarkdownOptions::all();

    entries
        .par_iter()
        .try_for_each(|entry| -> Result<()> {
            render_entry(entry, &options, config)?;
            progress.inc("pages");
            Ok(())
        })?;

    write_index(&collection, config)?;
    progress.inc("pages");
    progress.finish();

    let skipped = collection.len() - entries.len();
    if skipped > 0 {
        debug_summary(entries.len(), skipped);
    }
    log!("build"; "{} done, {} pages", mode_label(mode), entries.len() + 1);

    Ok(collection)
}

fn mode_label(mode: BuildMode) -> &'static str {
    if mode.is_production() {
        "production build"
    } else {
        "dev build"
    }
}

fn debug_summary(rendered: usize, skipped: usize) {
    crate::debug!("build"; "rendered {} entries, skipped {} drafts", rendered, skipped);
}

/// Clean (if requested) and create the output directory.
fn prepare_output_dir(config: &SiteConfig) -> Result<()> {
    let output = &config.build.output;

    if config.build.clean && output.exists() {
        fs::remove_dir_all(output)
            .with_context(|| format!("failed to clean {}", output.display()))?;
        log!("clean"; "{}", output.display());
    }

    fs::create_dir_all(output)
        .with_context(|| format!("failed to create {}", output.display()))?;
    Ok(())
}

/// Render a single entry to `{output}/{collection}/{id}/index.html`.
fn render_entry(entry: &ContentEntry, options: &MarkdownOptions, config: &SiteConfig) -> Result<()> {
    let body_html = from_markdown(&entry.body, options, &config.build.markdown);
    let html = render_entry_page(entry, &body_html, config);

    let out_path = config.build.output.join(entry.permalink.to_output_file());
    if let Some(parent) = out_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&out_path, html)
        .with_context(|| format!("failed to write {}", out_path.display()))?;
    Ok(())
}

/// Write the blog index page listing published entries.
fn write_index(collection: &Collection, config: &SiteConfig) -> Result<()> {
    let html = render_index_page(collection.published(), config);

    let index_url = UrlPath::from_page(&format!("/{}/", collection.name()));
    let out_path = config.build.output.join(index_url.to_output_file());
    if let Some(parent) = out_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&out_path, html)
        .with_context(|| format!("failed to write {}", out_path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use std::path::Path;

    /// Config rooted in a temp dir with a content/blog collection.
    fn setup_site(root: &Path, entries: &[(&str, &str)]) -> SiteConfig {
        let blog_dir = root.join("content/blog");
        fs::create_dir_all(&blog_dir).unwrap();
        for (file, content) in entries {
            fs::write(blog_dir.join(file), content).unwrap();
        }

        let mut config = test_parse_config("");
        config.build.content = root.join("content");
        config.build.output = root.join("dist");
        config
    }

    #[test]
    fn test_build_site_writes_pages() {
        let dir = tempfile::tempdir().unwrap();
        let config = setup_site(
            dir.path(),
            &[
                ("hello.md", "---\ntitle: Hello\ndate: 2024-01-10\n---\n# Hi"),
                ("world.md", "---\ntitle: World\ndate: 2024-01-20\n---\ntext"),
            ],
        );

        let collection = build_site(&config, BuildMode::Production).unwrap();
        assert_eq!(collection.len(), 2);

        // Entry pages under /blog/{id}/
        let hello = config.build.output.join("blog/hello/index.html");
        assert!(hello.is_file());
        let html = fs::read_to_string(&hello).unwrap();
        assert!(html.contains("<h1>Hello</h1>"));
        assert!(html.contains(">10.01.2024</time>"));

        // Blog index lists both entries
        let index = fs::read_to_string(config.build.output.join("blog/index.html")).unwrap();
        assert!(index.contains("/blog/hello/"));
        assert!(index.contains("/blog/world/"));
    }

    #[test]
    fn test_build_site_skips_drafts() {
        let dir = tempfile::tempdir().unwrap();
        let config = setup_site(
            dir.path(),
            &[("wip.md", "---\ntitle: WIP\ndraft: true\n---\ntext")],
        );

        build_site(&config, BuildMode::Production).unwrap();
        assert!(!config.build.output.join("blog/wip/index.html").exists());
    }

    #[test]
    fn test_build_site_includes_drafts_when_requested() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = setup_site(
            dir.path(),
            &[("wip.md", "---\ntitle: WIP\ndraft: true\n---\ntext")],
        );
        config.build.drafts = true;

        build_site(&config, BuildMode::Production).unwrap();
        assert!(config.build.output.join("blog/wip/index.html").is_file());
    }

    #[test]
    fn test_build_all_generates_feed_and_sitemap() {
        let dir = tempfile::tempdir().unwrap();
        let config = setup_site(
            dir.path(),
            &[(
                "a.md",
                "---\ntitle: T1\ndescription: D1\ndate: 2024-01-10\n---\nbody",
            )],
        );

        build_all(&config, BuildMode::Production).unwrap();

        let rss = fs::read_to_string(config.build.output.join("rss.xml")).unwrap();
        assert!(rss.contains("https://example.com/blog/a/"));
        assert!(rss.contains("T1"));
        assert!(rss.contains("D1"));

        let sitemap = fs::read_to_string(config.build.output.join("sitemap.xml")).unwrap();
        assert!(sitemap.contains("https://example.com/work"));
        assert!(sitemap.contains("https://example.com/blog/a/"));
    }

    #[test]
    fn test_build_all_empty_collection_still_writes_feed() {
        let dir = tempfile::tempdir().unwrap();
        let config = setup_site(dir.path(), &[]);

        build_all(&config, BuildMode::Production).unwrap();

        let rss = fs::read_to_string(config.build.output.join("rss.xml")).unwrap();
        assert!(rss.contains("<channel>"));
        assert!(!rss.contains("<item>"));
    }

    #[test]
    fn test_build_clean_removes_stale_output() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = setup_site(dir.path(), &[]);

        fs::create_dir_all(&config.build.output).unwrap();
        fs::write(config.build.output.join("stale.html"), "old").unwrap();

        config.build.clean = true;
        build_site(&config, BuildMode::Production).unwrap();
        assert!(!config.build.output.join("stale.html").exists());
    }

    #[test]
    fn test_dev_build_uses_local_base_url() {
        let dir = tempfile::tempdir().unwrap();
        let config = setup_site(
            dir.path(),
            &[(
                "a.md",
                "---\ntitle: T1\ndescription: D1\ndate: 2024-01-10\n---\nbody",
            )],
        );

        build_all(&config, BuildMode::Development).unwrap();

        let rss = fs::read_to_string(config.build.output.join("rss.xml")).unwrap();
        assert!(rss.contains("http://localhost:4321/blog/a/"));
        assert!(!rss.contains("https://example.com"));
    }
}
