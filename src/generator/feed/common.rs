//! Format-independent feed model.

use crate::{
    config::{FeedOrder, SiteConfig},
    content::Document,
    links::{BookmarkRecord, LinkRegistry},
    utils::{date::DateTimeUtc, path::resolve_link},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("`site.info.url` is required to generate a feed")]
    MissingSite,

    #[error("RSS validation failed: {0}")]
    Validation(String),

    #[error("cannot convert date '{0}' for the feed")]
    Date(String),
}

/// One feed entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItem {
    pub title: String,
    /// Absolute URL.
    pub link: String,
    pub date: DateTimeUtc,
    pub description: Option<String>,
    pub author: Option<String>,
    pub categories: Vec<String>,
}

impl FeedItem {
    /// Item for a content document, with its link resolved against `site`.
    pub fn from_document(doc: &Document, site: &str) -> Self {
        Self {
            title: doc.title.clone(),
            link: resolve_link(site, &doc.permalink),
            date: doc.date,
            description: doc.description.clone(),
            author: doc.author.clone(),
            categories: doc.tags.clone(),
        }
    }

    /// Item for a bookmark. The link points at the bookmarked resource.
    pub fn from_bookmark(record: &BookmarkRecord) -> Self {
        Self {
            title: record.name.clone(),
            link: record.url.clone(),
            date: record.date_added,
            description: None,
            author: None,
            categories: record.tags.clone(),
        }
    }
}

/// Channel-level data plus the items of one feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedMetadata {
    pub title: String,
    pub description: String,
    /// Base URL; the channel link and the base of every relative item link.
    pub site: String,
    pub language: String,
    /// Site-wide author, used when an item has none in RSS `email (Name)` form.
    pub author: String,
    pub email: String,
    pub items: Vec<FeedItem>,
}

impl FeedMetadata {
    /// Channel data from `[site.info]`, without items.
    pub fn from_config(config: &SiteConfig) -> Result<Self, FeedError> {
        let info = &config.site.info;
        let site = config
            .site_url()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or(FeedError::MissingSite)?;

        Ok(Self {
            title: info.title.clone(),
            description: info.description.clone(),
            site: site.trim_end_matches('/').to_string(),
            language: info.language.clone(),
            author: info.author.clone(),
            email: info.email.clone(),
            items: Vec::new(),
        })
    }

    /// Feed of content documents.
    pub fn for_documents(config: &SiteConfig, docs: &[Document]) -> Result<Self, FeedError> {
        let mut meta = Self::from_config(config)?;
        meta.items = docs
            .iter()
            .map(|doc| FeedItem::from_document(doc, &meta.site))
            .collect();
        meta.sort_items(config.build.feed.order);
        Ok(meta)
    }

    /// Feed of bookmarks.
    pub fn for_links(config: &SiteConfig, registry: &LinkRegistry) -> Result<Self, FeedError> {
        let mut meta = Self::from_config(config)?;
        meta.title = config.links.feed_title(&config.site.info.title);
        meta.items = registry.iter().map(FeedItem::from_bookmark).collect();
        meta.sort_items(config.build.feed.order);
        Ok(meta)
    }

    /// Apply the configured order. Sorting is stable.
    pub fn sort_items(&mut self, order: FeedOrder) {
        match order {
            FeedOrder::Discovery => {}
            FeedOrder::Newest => self.items.sort_by(|a, b| b.date.cmp(&a.date)),
        }
    }

    /// Date of the newest item.
    pub fn latest(&self) -> Option<DateTimeUtc> {
        self.items.iter().map(|item| item.date).max()
    }
}
