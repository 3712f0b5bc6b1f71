//! Content collections: named directories of markdown entries.
//!
//! The blog is a single collection named `blog` under the content
//! directory; its entries feed the page renderer, the syndication feed,
//! and the sitemap.

mod collection;
mod entry;
mod frontmatter;

pub use collection::Collection;
pub use entry::{ContentEntry, EntryMeta, JsonMap};
pub use frontmatter::extract_frontmatter;

/// Name of the blog collection directory under `build.content`.
pub const BLOG_COLLECTION: &str = "blog";
