//! `[build]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [build]
//! content = "content"         # Pages root; feed globs are relative to it
//! output = "dist"             # Where rss.xml and links.json are written
//! minify = true               # Strip XML indentation
//!
//! [build.feed]
//! enable = true               # Generate the feed
//! path = "rss.xml"            # Feed output path
//! format = "rss"              # rss | atom
//! glob = "posts/*.{md,mdx}"   # Documents that become feed items
//! order = "discovery"         # discovery | newest
//! ```

mod feed;

pub use feed::{FeedConfig, FeedFormat, FeedOrder};
pub(crate) use feed::validate_output_file;

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BuildSectionConfig {
    /// Content root directory (Markdown/MDX pages).
    pub content: PathBuf,

    /// Build output directory.
    pub output: PathBuf,

    /// Minify XML output.
    pub minify: bool,

    /// Clean output directory before building (CLI only).
    #[serde(skip)]
    pub clean: bool,

    /// Skip draft documents (CLI only).
    #[serde(skip)]
    pub skip_drafts: bool,

    /// Feed generation settings.
    pub feed: FeedConfig,
}

impl Default for BuildSectionConfig {
    fn default() -> Self {
        Self {
            content: "content".into(),
            output: "dist".into(),
            minify: true,
            clean: false,
            skip_drafts: false,
            feed: FeedConfig::default(),
        }
    }
}

impl BuildSectionConfig {
    pub const CONTENT: FieldPath = FieldPath::new("build.content");
    pub const OUTPUT: FieldPath = FieldPath::new("build.output");

    /// Validate build settings. Paths must already be normalized.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.feed.enable && !self.content.is_dir() {
            diag.error_with_hint(
                Self::CONTENT,
                format!("content directory `{}` does not exist", self.content.display()),
                "create it or point build.content at your pages",
            );
        }

        if self.output == self.content {
            diag.error(Self::OUTPUT, "output directory must differ from content directory");
        }

        self.feed.validate(diag);
    }
}
