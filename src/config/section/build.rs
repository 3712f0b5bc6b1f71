//! `[build]` section configuration.
//!
//! Build paths, output minification, and markdown rendering options.
//!
//! # Example
//!
//! ```toml
//! [build]
//! content = "content"
//! output = "dist"
//! minify = true
//!
//! [build.markdown]
//! wrap = true
//!
//! [build.markdown.theme]
//! light = "one-light"
//! dark = "one-dark-pro"
//! ```

use crate::config::types::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// [build]
// ============================================================================

/// Build settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSectionConfig {
    /// Content directory (relative to project root before normalization).
    pub content: PathBuf,

    /// Output directory (relative to project root before normalization).
    pub output: PathBuf,

    /// Minify generated XML output.
    pub minify: bool,

    /// Clean output directory before building (CLI only).
    #[serde(skip)]
    pub clean: bool,

    /// Include draft entries in the build (CLI only).
    #[serde(skip)]
    pub drafts: bool,

    /// Markdown rendering options.
    pub markdown: MarkdownSectionConfig,
}

/// Field paths for `[build]` diagnostics.
pub struct BuildFields {
    pub content: FieldPath,
    pub output: FieldPath,
}

impl BuildSectionConfig {
    pub const FIELDS: BuildFields = BuildFields {
        content: FieldPath::new("build.content"),
        output: FieldPath::new("build.output"),
    };

    /// Validate build configuration.
    ///
    /// # Checks
    /// - `content` must exist and be a directory
    /// - `output` must not equal `content`
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !self.content.is_dir() {
            diag.error_with_hint(
                Self::FIELDS.content,
                format!("content directory not found: {}", self.content.display()),
                "create it or point build.content at your markdown files",
            );
        }

        if self.content == self.output {
            diag.error(
                Self::FIELDS.output,
                "output directory must differ from content directory",
            );
        }
    }
}

impl Default for BuildSectionConfig {
    fn default() -> Self {
        Self {
            content: "content".into(),
            output: "dist".into(),
            minify: true,
            clean: false,
            drafts: false,
            markdown: MarkdownSectionConfig::default(),
        }
    }
}

// ============================================================================
// [build.markdown]
// ============================================================================

/// Markdown rendering options, including the code-block highlight theme
/// pair consumed by stylesheets.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownSectionConfig {
    /// Highlight theme pair for fenced code blocks.
    pub theme: ThemePairConfig,

    /// Soft-wrap long lines inside code blocks.
    pub wrap: bool,
}

impl Default for MarkdownSectionConfig {
    fn default() -> Self {
        Self {
            theme: ThemePairConfig::default(),
            wrap: true,
        }
    }
}

/// Light/dark highlight theme identifiers.
///
/// The identifiers are emitted on code blocks as data attributes; the
/// stylesheet decides which palette applies for the active color scheme.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemePairConfig {
    /// Theme used when the reader prefers a light color scheme.
    pub light: String,

    /// Theme used when the reader prefers a dark color scheme.
    pub dark: String,
}

impl Default for ThemePairConfig {
    fn default() -> Self {
        Self {
            light: "one-light".into(),
            dark: "one-dark-pro".into(),
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
        assert_eq!(config.build.content, PathBuf::from("content"));
        assert_eq!(config.build.output, PathBuf::from("dist"));
        assert!(config.build.minify);
        assert!(config.build.markdown.wrap);
        assert_eq!(config.build.markdown.theme.light, "one-light");
        assert_eq!(config.build.markdown.theme.dark, "one-dark-pro");
    }

    #[test]
    fn test_custom_markdown_config() {
        let config = test_parse_config(
            "[build.markdown]\nwrap = false\n[build.markdown.theme]\nlight = \"github-light\"\ndark = \"github-dark\"",
        );
        assert!(!config.build.markdown.wrap);
        assert_eq!(config.build.markdown.theme.light, "github-light");
        assert_eq!(config.build.markdown.theme.dark, "github-dark");
    }

    #[test]
    fn test_validate_output_equals_content() {
        let mut config = test_parse_config("");
        config.build.content = PathBuf::from("same");
        config.build.output = PathBuf::from("same");

        let mut diag = ConfigDiagnostics::new();
        config.build.validate(&mut diag);
        assert!(diag.has_errors());
    }
}
