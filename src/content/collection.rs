//! Content collection loading.
//!
//! A collection is a named directory of markdown files. Each file becomes
//! a [`ContentEntry`] with an id slugged from its file stem and a
//! permalink of `/{collection}/{id}/`. Ids are unique within a collection;
//! loading fails on a collision.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use jwalk::WalkDir;
use rustc_hash::FxHashMap;

use super::entry::{ContentEntry, EntryMeta};
use super::frontmatter::extract_frontmatter;
use crate::core::UrlPath;
use crate::utils::slug::slugify;

/// A loaded, ordered content collection.
#[derive(Debug, Default)]
pub struct Collection {
    name: String,
    entries: Vec<ContentEntry>,
}

impl Collection {
    /// Load all markdown entries under `dir` as the collection `name`.
    ///
    /// Entries are ordered by publication date descending; entries without
    /// a date sort last, by title. Duplicate ids are rejected.
    pub fn load(name: &str, dir: &Path) -> Result<Self> {
        let files = collect_markdown_files(dir);

        let mut entries = Vec::with_capacity(files.len());
        let mut seen: FxHashMap<String, PathBuf> = FxHashMap::default();

        for path in files {
            let entry = load_entry(name, &path)
                .with_context(|| format!("failed to load entry {}", path.display()))?;

            if let Some(previous) = seen.insert(entry.id.clone(), path.clone()) {
                bail!(
                    "duplicate entry id '{}' in collection '{}': {} and {}",
                    entry.id,
                    name,
                    previous.display(),
                    path.display()
                );
            }

            entries.push(entry);
        }

        sort_entries(&mut entries);

        Ok(Self {
            name: name.to_string(),
            entries,
        })
    }

    /// Collection name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All entries, drafts included, in collection order.
    pub fn entries(&self) -> &[ContentEntry] {
        &self.entries
    }

    /// Non-draft entries, in collection order.
    pub fn published(&self) -> impl Iterator<Item = &ContentEntry> {
        self.entries.iter().filter(|e| !e.is_draft())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Collect markdown files under `dir`, sorted by path for determinism.
fn collect_markdown_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .skip_hidden(true)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path())
        .filter(|p| {
            p.extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("md"))
        })
        .collect();
    files.sort();
    files
}

/// Load a single entry from a markdown file.
fn load_entry(collection: &str, path: &Path) -> Result<ContentEntry> {
    let source = std::fs::read_to_string(path)?;

    let (meta, body) = match extract_frontmatter(&source)? {
        Some((meta, body)) => (meta, body.to_string()),
        None => (EntryMeta::default(), source),
    };

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    let id = slugify(&stem);
    if id.is_empty() {
        bail!("entry file stem produces an empty id: {}", path.display());
    }

    let permalink = UrlPath::from_page(&format!("/{}/{}", collection, id));

    Ok(ContentEntry {
        id,
        permalink,
        meta,
        body,
        source: path.to_path_buf(),
    })
}

/// Order entries by date descending, undated entries last by title.
fn sort_entries(entries: &mut [ContentEntry]) {
    entries.sort_by(|a, b| match (&b.meta.date, &a.meta.date) {
        (Some(date_b), Some(date_a)) => date_b.cmp(date_a),
        (Some(_), None) => std::cmp::Ordering::Greater,
        (None, Some(_)) => std::cmp::Ordering::Less,
        (None, None) => a.title().cmp(b.title()),
    });
}
