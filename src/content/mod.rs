//! Content documents: discovery and front-matter parsing.
//!
//! ```text
//! content/
//! ├── discover     # jwalk + glob
//! ├── frontmatter  # `---` YAML / `+++` TOML fences
//! ├── meta         # DocumentMeta
//! └── mod.rs       # Document, load_documents (this file)
//! ```

mod discover;
mod frontmatter;
mod meta;

pub use discover::{SourceFile, discover};
pub use frontmatter::FrontMatterError;
pub use meta::DocumentMeta;

use crate::{
    config::SiteConfig,
    debug,
    logger::ProgressLine,
    utils::{date::DateTimeUtc, path::permalink_for},
};
use rayon::prelude::*;
use std::{fs, io, path::PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("content directory `{0}` not found")]
    MissingDir(PathBuf),

    #[error("invalid glob `{0}`")]
    Glob(String, #[source] globset::Error),

    #[error("failed to walk `{0}`")]
    Walk(PathBuf, #[source] jwalk::Error),

    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] io::Error),

    #[error("cannot read front-matter of `{0}`")]
    FrontMatter(PathBuf, #[source] FrontMatterError),

    #[error("`{0}` has no `{1}` in its front-matter")]
    MissingField(PathBuf, &'static str),

    #[error("`{0}`: date '{1}' is not a recognized date (use YYYY-MM-DD or RFC 3339)")]
    InvalidDate(PathBuf, String),
}

/// A content document ready to become a feed item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Path relative to the content directory.
    pub relative: PathBuf,
    pub title: String,
    pub date: DateTimeUtc,
    pub description: Option<String>,
    pub author: Option<String>,
    pub tags: Vec<String>,
    pub draft: bool,
    /// URL path (`/posts/hello`), or an absolute URL from front-matter.
    pub permalink: String,
}

impl Document {
    /// Parse a document from its source text.
    pub fn parse(file: &SourceFile, content: &str) -> Result<Self, ContentError> {
        let (meta, _body) = frontmatter::extract(content)
            .map_err(|err| ContentError::FrontMatter(file.relative.clone(), err))?;
        Self::from_meta(file, meta)
    }

    /// Read and parse a document from disk.
    pub fn load(file: &SourceFile) -> Result<Self, ContentError> {
        let content =
            fs::read_to_string(&file.path).map_err(|err| ContentError::Io(file.path.clone(), err))?;
        Self::parse(file, &content)
    }

    fn from_meta(file: &SourceFile, meta: DocumentMeta) -> Result<Self, ContentError> {
        let missing = |field| ContentError::MissingField(file.relative.clone(), field);

        let title = meta
            .title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| missing("title"))?;

        let raw_date = meta.date.ok_or_else(|| missing("date"))?;
        let date = DateTimeUtc::parse(&raw_date)
            .ok_or_else(|| ContentError::InvalidDate(file.relative.clone(), raw_date.clone()))?;

        let permalink = match meta.permalink.as_deref().map(str::trim) {
            Some(p) if !p.is_empty() => p.to_string(),
            _ => permalink_for(&file.relative),
        };

        Ok(Self {
            relative: file.relative.clone(),
            title,
            date,
            description: meta.description.filter(|d| !d.trim().is_empty()),
            author: meta.author.filter(|a| !a.trim().is_empty()),
            tags: meta.tags,
            draft: meta.draft,
            permalink,
        })
    }
}

/// Discover and parse every feed document.
///
/// Parsing runs in parallel. The result keeps discovery order, and the first
/// failing document in that order is the error returned.
pub fn load_documents(config: &SiteConfig) -> Result<Vec<Document>, ContentError> {
    let files = discover(&config.build.content, &config.build.feed.glob)?;
    debug!("feed"; "{} documents match `{}`", files.len(), config.build.feed.glob);

    let progress = ProgressLine::new(&[("posts", files.len())]);
    let results: Vec<_> = files
        .par_iter()
        .map(|file| {
            let doc = Document::load(file);
            progress.inc("posts");
            doc
        })
        .collect();
    progress.finish();

    let mut documents = Vec::with_capacity(results.len());
    for result in results {
        let doc = result?;
        if doc.draft && config.build.skip_drafts {
            debug!("feed"; "skipping draft {}", doc.relative.display());
            continue;
        }
        documents.push(doc);
    }
    Ok(documents)
}
