//! `[links]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [links]
//! source = "links.toml"         # Bookmark registry (relative to site root)
//! export = true                 # Write the registry as JSON
//! export_path = "links.json"    # ...to this path inside the output directory
//! feed = false                  # Also publish bookmarks as a feed
//! feed_path = "links.xml"
//! feed_title = "Mimmy's links"  # Defaults to "<site title> links"
//! ```

use super::build::validate_output_file;
use crate::config::{ConfigDiagnostics, FieldPath};
use serde::Deserialize;
use std::path::PathBuf;

/// Registry file looked up when `links.source` is not set.
pub const DEFAULT_LINKS_FILE: &str = "links.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LinksConfig {
    /// Registry file. `None` means the optional default `links.toml`.
    pub source: Option<PathBuf>,
    /// Write `links.json` during build.
    pub export: bool,
    /// JSON output path, relative to the output directory.
    pub export_path: PathBuf,
    /// Publish bookmarks as a feed.
    pub feed: bool,
    /// Bookmark feed output path, relative to the output directory.
    pub feed_path: PathBuf,
    /// Bookmark feed title.
    pub feed_title: Option<String>,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            source: None,
            export: true,
            export_path: "links.json".into(),
            feed: false,
            feed_path: "links.xml".into(),
            feed_title: None,
        }
    }
}

impl LinksConfig {
    pub const FEED: FieldPath = FieldPath::new("links.feed");
    pub const EXPORT_PATH: FieldPath = FieldPath::new("links.export_path");
    pub const FEED_PATH: FieldPath = FieldPath::new("links.feed_path");

    pub fn validate(&self, feed_path: &std::path::Path, diag: &mut ConfigDiagnostics) {
        if self.export {
            validate_output_file(&self.export_path, Self::EXPORT_PATH, diag);
        }
        if self.feed {
            validate_output_file(&self.feed_path, Self::FEED_PATH, diag);
            if self.feed_path == feed_path {
                diag.error_with_hint(
                    Self::FEED_PATH,
                    "collides with build.feed.path",
                    "give the bookmark feed its own file, e.g. \"links.xml\"",
                );
            }
        }
    }

    /// Title of the bookmark feed.
    pub fn feed_title(&self, site_title: &str) -> String {
        self.feed_title
            .clone()
            .unwrap_or_else(|| format!("{site_title} links").trim().to_string())
    }
}
