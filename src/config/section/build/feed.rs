//! Feed (RSS/Atom) generation configuration.

use crate::config::{ConfigDiagnostics, FieldPath};
use globset::Glob;
use serde::Deserialize;
use std::path::{Component, Path, PathBuf};

/// Feed output format.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FeedFormat {
    /// RSS 2.0 format (default).
    #[default]
    Rss,
    /// Atom 1.0 format.
    Atom,
}

/// Item order inside the generated feed.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FeedOrder {
    /// Order in which documents were discovered (sorted by path).
    #[default]
    Discovery,
    /// Most recent date first; documents with equal dates keep discovery order.
    Newest,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Enable feed generation.
    pub enable: bool,
    /// Output path for feed file, relative to the output directory.
    pub path: PathBuf,
    /// Feed format (RSS 2.0 or Atom 1.0).
    pub format: FeedFormat,
    /// Glob selecting feed documents, relative to the content directory.
    pub glob: String,
    /// Item order.
    pub order: FeedOrder,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            enable: true,
            path: "rss.xml".into(),
            format: FeedFormat::Rss,
            glob: "posts/*.{md,mdx}".into(),
            order: FeedOrder::Discovery,
        }
    }
}

impl FeedConfig {
    pub const ENABLE: FieldPath = FieldPath::new("build.feed.enable");
    pub const PATH: FieldPath = FieldPath::new("build.feed.path");
    pub const GLOB: FieldPath = FieldPath::new("build.feed.glob");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        validate_output_file(&self.path, Self::PATH, diag);

        if let Err(e) = Glob::new(&self.glob) {
            diag.error_with_hint(
                Self::GLOB,
                format!("invalid glob: {e}"),
                "use a pattern like \"posts/*.{md,mdx}\"",
            );
        }
    }
}

/// Check that an output file path stays inside the output directory.
pub(crate) fn validate_output_file(path: &Path, field: FieldPath, diag: &mut ConfigDiagnostics) {
    if path.as_os_str().is_empty() || path.file_name().is_none() {
        diag.error(field, "must name a file");
        return;
    }
    let escapes = path
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes {
        diag.error_with_hint(
            field,
            format!("`{}` must be a relative path", path.display()),
            "paths are resolved inside the output directory",
        );
    }
}
