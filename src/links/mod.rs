//! Bookmark registry.
//!
//! The registry is a hand-maintained `links.toml`:
//!
//! ```toml
//! [[links]]
//! name = "Trying to Survive in Prison as a First Time Offender"
//! dateAdded = "2022-12-29"
//! url = "https://www.youtube.com/watch?v=bEWdAYvANcc"
//! tags = ["fight"]
//! ```
//!
//! It is loaded and validated once per run. A registry with any invalid
//! record is rejected as a whole, and the error lists every problem.
//! Records keep file order; nothing is sorted or deduplicated across records.

mod export;
mod record;

pub use export::to_json;
pub use record::{BookmarkRecord, RawBookmark, RecordIssue};

use crate::{config::SiteConfig, debug, log, utils::date::DateTimeUtc};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Deserialize;
use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("bookmark registry `{0}` not found")]
    NotFound(PathBuf),

    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] io::Error),

    #[error("cannot parse bookmark registry `{0}`")]
    Toml(PathBuf, #[source] toml::de::Error),

    #[error("{}", InvalidRecords(.0.as_path(), .1.as_slice()))]
    Invalid(PathBuf, Vec<RecordIssue>),
}

/// Display helper for [`RegistryError::Invalid`].
struct InvalidRecords<'a>(&'a Path, &'a [RecordIssue]);

impl fmt::Display for InvalidRecords<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self(path, issues) = self;
        write!(f, "invalid bookmarks in `{}`:", path.display())?;
        for issue in *issues {
            write!(
                f,
                "\n  - link #{} `{}`: {}",
                issue.position, issue.field, issue.message
            )?;
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
struct RegistryFile {
    #[serde(default)]
    links: Vec<RawBookmark>,
}

/// Validated, ordered bookmark collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkRegistry {
    records: Vec<BookmarkRecord>,
}

impl LinkRegistry {
    /// Load the registry configured for this site.
    ///
    /// A missing default `links.toml` yields an empty registry; a missing
    /// explicit `links.source` is an error.
    pub fn from_config(config: &SiteConfig) -> Result<Self, RegistryError> {
        let (path, required) = config.links_source();
        if !path.exists() {
            if required {
                return Err(RegistryError::NotFound(path));
            }
            debug!("links"; "no {} found, registry is empty", path.display());
            return Ok(Self::default());
        }
        Self::load(&path)
    }

    /// Read and validate a registry file.
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let content =
            fs::read_to_string(path).map_err(|err| RegistryError::Io(path.to_path_buf(), err))?;
        Self::parse(&content, path)
    }

    /// Parse registry content. `path` is only used in error messages.
    pub fn parse(content: &str, path: &Path) -> Result<Self, RegistryError> {
        let file: RegistryFile =
            toml::from_str(content).map_err(|err| RegistryError::Toml(path.to_path_buf(), err))?;

        let mut records = Vec::with_capacity(file.links.len());
        let mut issues = Vec::new();
        for (i, raw) in file.links.into_iter().enumerate() {
            match raw.validate(i + 1) {
                Ok(record) => records.push(record),
                Err(mut found) => issues.append(&mut found),
            }
        }

        if !issues.is_empty() {
            return Err(RegistryError::Invalid(path.to_path_buf(), issues));
        }

        let registry = Self { records };
        registry.report_duplicate_urls();
        Ok(registry)
    }

    /// Records in file order.
    pub fn records(&self) -> &[BookmarkRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BookmarkRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct tags in first-seen order.
    pub fn tags(&self) -> Vec<&str> {
        let mut seen = FxHashSet::default();
        self.records
            .iter()
            .flat_map(|r| &r.tags)
            .map(String::as_str)
            .filter(|tag| seen.insert(*tag))
            .collect()
    }

    /// Date of the most recently added record.
    pub fn last_added(&self) -> Option<DateTimeUtc> {
        self.records.iter().map(|r| r.date_added).max()
    }

    /// Duplicate URLs are allowed, but usually a mistake worth mentioning.
    fn report_duplicate_urls(&self) {
        let mut seen: FxHashMap<&str, usize> = FxHashMap::default();
        for (i, record) in self.records.iter().enumerate() {
            if let Some(prev) = seen.insert(record.url.as_str(), i + 1) {
                debug!("links"; "link #{} repeats the url of link #{}: {}", i + 1, prev, record.url);
            }
        }
    }

    /// Print a one-line summary.
    pub fn log_summary(&self) {
        if self.is_empty() {
            debug!("links"; "registry is empty");
            return;
        }
        log!(
            "links";
            "{} in registry, {}, last added {}",
            crate::utils::plural_count(self.len(), "bookmark"),
            crate::utils::plural_count(self.tags().len(), "tag"),
            self.last_added().map(DateTimeUtc::to_iso_date).unwrap_or_default()
        );
    }
}
