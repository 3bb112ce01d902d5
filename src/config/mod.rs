//! Site configuration management for `starlog.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── build/     # [build] and [build.feed]
//! │   ├── links      # [links]
//! │   ├── markdown   # [markdown] and [markdown.shiki]
//! │   └── site       # [site.info]
//! ├── types/         # ConfigError, ConfigDiagnostics, FieldPath
//! └── mod.rs         # SiteConfig (this file)
//! ```

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{
    BuildSectionConfig, DEFAULT_LINKS_FILE, FeedFormat, FeedOrder, LinksConfig, MarkdownConfig,
    SiteSectionConfig, ThemeChoice,
};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use crate::{
    cli::{BuildArgs, Cli, Commands},
    log,
    utils::path::normalize_path,
};
use anyhow::Result;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing starlog.toml
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SiteConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Site configuration
    #[serde(default)]
    pub site: SiteSectionConfig,

    /// Build settings
    #[serde(default)]
    pub build: BuildSectionConfig,

    /// Markdown renderer settings (pass-through)
    #[serde(default)]
    pub markdown: MarkdownConfig,

    /// Bookmark registry settings
    #[serde(default)]
    pub links: LinksConfig,
}

impl SiteConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd to find the config file. The project root is
    /// the config file's parent directory.
    pub fn load(cli: &Cli) -> Result<Self> {
        let config_path =
            find_config_file(&cli.config).ok_or_else(|| ConfigError::NotFound(cli.config.clone()))?;

        let mut config = Self::from_path(&config_path)?;
        config.config_path = normalize_path(&config_path);
        config.finalize(cli);
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {} are ignored:", display_path);
        for field in fields {
            eprintln!("- {field}");
        }
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.root = path.to_path_buf();
    }

    /// Get path relative to the site root
    pub fn root_relative(&self, path: impl AsRef<Path>) -> PathBuf {
        path.as_ref()
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.as_ref().to_path_buf())
    }

    /// Site base URL, if configured.
    pub fn site_url(&self) -> Option<&str> {
        self.site.info.url.as_deref()
    }

    /// Registry file and whether it must exist.
    ///
    /// An explicit `links.source` must exist; the default `links.toml` is
    /// optional.
    pub fn links_source(&self) -> (PathBuf, bool) {
        match &self.links.source {
            Some(path) => (path.clone(), true),
            None => (self.root.join(DEFAULT_LINKS_FILE), false),
        }
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Finalize configuration after loading.
    fn finalize(&mut self, cli: &Cli) {
        let root = self
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        Self::update_option(&mut self.build.content, cli.content.as_ref());
        Self::update_option(&mut self.build.output, cli.output.as_ref());

        match &cli.command {
            Commands::Build { build_args, clean } => {
                self.apply_build_args(build_args);
                self.build.clean = *clean;
            }
            Commands::Check { build_args } => self.apply_build_args(build_args),
        }

        self.normalize_paths(&root);
    }

    /// Apply build arguments from CLI.
    fn apply_build_args(&mut self, args: &BuildArgs) {
        crate::logger::set_verbose(args.verbose);

        Self::update_option(&mut self.build.minify, args.minify.as_ref());
        Self::update_option(&mut self.build.feed.enable, args.rss.as_ref());
        self.build.skip_drafts = args.skip_drafts;

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

    /// Normalize all paths relative to root directory.
    ///
    /// Output-relative paths (`build.feed.path`, `links.export_path`, ...)
    /// stay relative and are joined with the output directory at write time.
    fn normalize_paths(&mut self, root: &Path) {
        let root = normalize_path(root);
        self.set_root(&root);

        self.build.content = normalize_path(&root.join(&self.build.content));
        self.build.output = normalize_path(&root.join(&self.build.output));

        if let Some(source) = self.links.source.take() {
            self.links.source = Some(Self::normalize_user_path(&source, &root));
        }
    }

    /// Normalize a user-supplied path with tilde expansion.
    fn normalize_user_path(path: &Path, root: &Path) -> PathBuf {
        let expanded = shellexpand::tilde(path.to_str().unwrap_or_default()).into_owned();
        let path = PathBuf::from(expanded);
        let full_path = if path.is_relative() {
            root.join(&path)
        } else {
            path
        };
        normalize_path(&full_path)
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate the whole configuration.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        let feed_switch = if self.build.feed.enable {
            Some(section::FeedConfig::ENABLE)
        } else if self.links.feed {
            Some(LinksConfig::FEED)
        } else {
            None
        };
        self.site.info.validate(feed_switch, &mut diag);
        self.build.validate(&mut diag);
        self.markdown.validate(&self.root, &mut diag);
        self.links.validate(&self.build.feed.path, &mut diag);

        diag.print_warnings();

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
    let config = format!("[site.info]\ntitle = \"Test\"\ndescription = \"Test\"\n{extra}");
    let (parsed, ignored) = SiteConfig::parse_with_ignored(&config).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

/// Build a ready-to-use config rooted at `root`, as `load` would leave it.
#[cfg(test)]
pub fn test_site_config(root: &Path, extra: &str) -> SiteConfig {
    let mut config = test_parse_config(&format!(
        "[build]\nminify = false\n{extra}"
    ));
    if config.site.info.url.is_none() {
        config.site.info.url = Some("https://example.com".into());
    }
    config.config_path = root.join("starlog.toml");
    config.normalize_paths(root);
    config
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_invalid_toml() {
        assert!(SiteConfig::parse_with_ignored("[base\ntitle = \"My Blog\"").is_err());
    }

    #[test]
    fn test_site_config_default() {
        let config = SiteConfig::default();
        assert_eq!(config.config_path, PathBuf::new());
        assert_eq!(config.site.info.title, "");
        assert_eq!(config.site.info.language, "en");
        assert!(config.build.minify);
        assert!(config.build.feed.enable);
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "[site.info]\ntitle = \"Test\"\n[unknown_section]\nfield = \"value\"";
        let (config, ignored) = SiteConfig::parse_with_ignored(content).unwrap();

        assert_eq!(config.site.info.title, "Test");
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
    }

    #[test]
    fn test_no_unknown_fields() {
        let content = "[site.info]\ntitle = \"Test\"\ndescription = \"Test\"";
        let (_, ignored) = SiteConfig::parse_with_ignored(content).unwrap();
        assert!(ignored.is_empty());
    }

    #[test]
    fn test_normalize_paths_against_root() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_site_config(dir.path(), "[links]\nsource = \"data/links.toml\"");
        let root = normalize_path(dir.path());

        assert_eq!(config.get_root(), root);
        assert_eq!(config.build.content, root.join("content"));
        assert_eq!(config.build.output, root.join("dist"));
        assert_eq!(config.links_source(), (root.join("data/links.toml"), true));
        assert_eq!(config.build.feed.path, PathBuf::from("rss.xml"));
    }

    #[test]
    fn test_default_links_source_is_optional() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_site_config(dir.path(), "");
        let (path, required) = config.links_source();
        assert!(path.ends_with(DEFAULT_LINKS_FILE));
        assert!(!required);
    }

    #[test]
    fn test_validate_missing_url_with_feed() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("content")).unwrap();
        let mut config = test_site_config(dir.path(), "");
        config.site.info.url = None;

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("site.info.url"));

        config.build.feed.enable = false;
        assert!(config.validate().is_ok());

        config.links.feed = true;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("links.feed"));
    }
}
