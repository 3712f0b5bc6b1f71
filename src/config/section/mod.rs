//! Configuration section definitions.
//!
//! Each module corresponds to a section in `brume.toml`:
//!
//! | Module  | TOML Section | Purpose                              |
//! |---------|--------------|--------------------------------------|
//! | `build` | `[build]`    | Build paths, minify, markdown        |
//! | `serve` | `[serve]`    | Development server                   |
//! | `site`  | `[site]`     | Site info, feed, sitemap             |

pub mod build;
mod serve;
pub mod site;

// Re-export section configs
pub use build::{BuildSectionConfig, MarkdownSectionConfig, ThemePairConfig};
pub use serve::ServeConfig;
pub use site::{FeedConfig, FeedFormat, SiteInfoConfig, SiteSectionConfig, SitemapConfig};
