//! Site configuration management for `brume.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── build      # [build] and [build.markdown]
//! │   ├── serve      # [serve]
//! │   └── site       # [site.info], [site.feed], [site.sitemap]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   └── field      # FieldPath
//! └── mod.rs         # SiteConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section            | Purpose                                      |
//! |--------------------|----------------------------------------------|
//! | `[site.info]`      | Site metadata (title, author, url, language) |
//! | `[site.feed]`      | Feed generation (RSS/Atom)                   |
//! | `[site.sitemap]`   | Sitemap generation                           |
//! | `[build]`          | Build paths, minify, markdown themes         |
//! | `[serve]`          | Development server (port, interface)         |

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

// Re-export from section/
pub use section::{
    BuildSectionConfig, FeedConfig, FeedFormat, MarkdownSectionConfig, ServeConfig,
    SiteInfoConfig, SiteSectionConfig, SitemapConfig, ThemePairConfig,
};

// Re-export from types/
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use crate::{
    cli::{BuildArgs, Cli, Commands},
    core::BuildMode,
    log,
    utils::path::normalize_path,
};
use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing brume.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Site configuration (info, feed, sitemap)
    pub site: SiteSectionConfig,

    /// Build settings
    pub build: BuildSectionConfig,

    /// Development server settings
    pub serve: ServeConfig,
}

impl SiteConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd to find the config file. The project root
    /// is determined by the config file's parent directory.
    pub fn load(cli: &Cli) -> Result<Self> {
        let config_path = match find_config_file(&cli.config) {
            Some(path) => path,
            None => {
                log!(
                    "error";
                    "Config file '{}' not found. Create one at the project root.",
                    cli.config.display()
                );
                std::process::exit(1);
            }
        };

        let mut config = Self::from_path(&config_path)?;

        config.config_path = config_path;
        config.finalize(cli);
        config.validate()?;

        Ok(config)
    }

    /// Finalize configuration after loading.
    fn finalize(&mut self, cli: &Cli) {
        let root = self
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        self.root = normalize_path(&root);
        self.config_path = normalize_path(&self.config_path);
        self.normalize_paths();
        self.apply_command_options(cli);
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
            if !Self::prompt_continue()? {
                bail!("Aborted due to unknown config fields");
            }
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        // Show only filename (brume.toml) since it's always at site root
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        eprintln!();
        log!("warning"; "unknown fields in {}:", display_path);
        log!("warning"; "ignoring:");
        for field in fields {
            eprintln!("- {}", field);
        }
        eprintln!();
    }

    /// Prompt user to continue. Returns true only if user explicitly confirms.
    fn prompt_continue() -> Result<bool> {
        use std::io::{self, Write};

        eprint!("Continue? [y/N] ");
        io::stderr().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        let input = input.trim().to_lowercase();
        // Default no (empty input), explicit "y" or "yes" to continue
        Ok(input == "y" || input == "yes")
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Join a path with the root directory.
    pub fn root_join(&self, path: impl AsRef<Path>) -> PathBuf {
        self.root.join(path)
    }

    // ========================================================================
    // base URL selection
    // ========================================================================

    /// Resolve the base URL for the given build mode.
    ///
    /// Production builds use the configured site URL; development builds
    /// use the local server address (`http://localhost:4321` by default).
    /// The returned URL never carries a trailing slash.
    pub fn base_url(&self, mode: BuildMode) -> String {
        match mode {
            BuildMode::Production => self
                .site
                .info
                .url
                .as_deref()
                .unwrap_or_default()
                .trim_end_matches('/')
                .to_string(),
            BuildMode::Development => format!(
                "http://{}:{}",
                self.serve.display_host(),
                self.serve.port
            ),
        }
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply command-specific configuration options.
    fn apply_command_options(&mut self, cli: &Cli) {
        match &cli.command {
            Commands::Build { build_args } => {
                self.apply_build_args(build_args);
            }
            Commands::Serve {
                build_args,
                interface,
                port,
            } => {
                self.apply_build_args(build_args);
                Self::update_option(&mut self.serve.interface, interface.as_ref());
                Self::update_option(&mut self.serve.port, port.as_ref());
            }
        }
    }

    /// Apply build arguments from CLI.
    fn apply_build_args(&mut self, args: &BuildArgs) {
        // Set verbose mode globally
        crate::logger::set_verbose(args.verbose);

        Self::update_option(&mut self.build.minify, args.minify.as_ref());
        Self::update_option(&mut self.site.feed.enable, args.rss.as_ref());
        Self::update_option(&mut self.site.sitemap.enable, args.sitemap.as_ref());
        self.build.clean = args.clean;
        self.build.drafts = args.drafts;

        // Override site URL if provided via CLI
        if let Some(ref url) = args.site_url {
            self.site.info.url = Some(url.clone());
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // path normalization
    // ========================================================================

    /// Normalize build directories relative to the root directory.
    ///
    /// Note: feed.path and sitemap.path are kept as relative filenames.
    /// They are resolved against the output directory at write time.
    fn normalize_paths(&mut self) {
        self.build.content = normalize_path(&self.root.join(&self.build.content));
        self.build.output = normalize_path(&self.root.join(&self.build.output));
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        if !self.config_path.exists() {
            bail!(ConfigError::Validation("config file not found".into()));
        }

        // Validate each section
        self.site.info.validate(self.site.feed.enable, &mut diag);
        self.site.feed.validate(&mut diag);
        self.build.validate(&mut diag);

        // Return all collected errors
        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config with minimal required `[site.info]` fields.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(extra: &str) -> SiteConfig {
    let config = format!(
        "[site.info]\ntitle = \"Test\"\ndescription = \"Test\"\nurl = \"https://example.com\"\n{extra}"
    );
    let (parsed, ignored) = SiteConfig::parse_with_ignored(&config).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_invalid_toml() {
        // Invalid TOML syntax - unclosed bracket
        let result: Result<SiteConfig, _> = toml::from_str("[site\ntitle = \"My Blog\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_site_config_default() {
        let config = SiteConfig::default();

        assert_eq!(config.config_path, PathBuf::new());
        assert_eq!(config.site.info.title, "");
        assert!(config.build.minify);
        assert_eq!(config.serve.port, 4321);
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "[site.info]\ntitle = \"Test\"\n[unknown_section]\nfield = \"value\"";
        let (config, ignored) = SiteConfig::parse_with_ignored(content).unwrap();

        // Config should parse successfully
        assert_eq!(config.site.info.title, "Test");

        // Unknown fields should be collected
        assert!(!ignored.is_empty());
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
    }

    #[test]
    fn test_no_unknown_fields() {
        let content = "[site.info]\ntitle = \"Test\"\ndescription = \"Test\"";
        let (_, ignored) = SiteConfig::parse_with_ignored(content).unwrap();
        assert!(ignored.is_empty());
    }

    #[test]
    fn test_base_url_production() {
        let config = test_parse_config("");
        assert_eq!(
            config.base_url(BuildMode::Production),
            "https://example.com"
        );
    }

    #[test]
    fn test_base_url_production_trims_trailing_slash() {
        let mut config = test_parse_config("");
        config.site.info.url = Some("https://matthiasweiss.at/".into());
        assert_eq!(
            config.base_url(BuildMode::Production),
            "https://matthiasweiss.at"
        );
    }

    #[test]
    fn test_base_url_development() {
        // The production URL is only used in production mode; a dev build
        // always points at the local server.
        let mut config = test_parse_config("");
        config.site.info.url = Some("https://matthiasweiss.at".into());
        assert_eq!(
            config.base_url(BuildMode::Development),
            "http://localhost:4321"
        );
    }

    #[test]
    fn test_base_url_development_custom_port() {
        let config = test_parse_config("[serve]\nport = 8080");
        assert_eq!(
            config.base_url(BuildMode::Development),
            "http://localhost:8080"
        );
    }
}
