//! RSS 2.0 feed rendering.

use super::common::{FeedError, FeedItem, FeedMetadata};
use regex::Regex;
use rss::{CategoryBuilder, ChannelBuilder, GuidBuilder, ItemBuilder, validation::Validate};
use std::sync::LazyLock;

/// Render and validate an RSS 2.0 channel.
pub fn render_rss(meta: &FeedMetadata) -> Result<String, FeedError> {
    let items: Vec<_> = meta.items.iter().map(|item| to_rss_item(item, meta)).collect();

    let channel = ChannelBuilder::default()
        .title(meta.title.clone())
        .link(meta.site.clone())
        .description(meta.description.clone())
        .language(meta.language.clone())
        .generator("starlog".to_string())
        .last_build_date(meta.latest().map(|date| date.to_rfc2822()))
        .items(items)
        .build();

    channel
        .validate()
        .map_err(|e| FeedError::Validation(e.to_string()))?;
    Ok(channel.to_string())
}

fn to_rss_item(item: &FeedItem, meta: &FeedMetadata) -> rss::Item {
    let categories: Vec<_> = item
        .categories
        .iter()
        .map(|tag| CategoryBuilder::default().name(tag.clone()).build())
        .collect();

    ItemBuilder::default()
        .title(item.title.clone())
        .link(item.link.clone())
        .guid(
            GuidBuilder::default()
                .permalink(true)
                .value(item.link.clone())
                .build(),
        )
        .description(item.description.clone())
        .pub_date(item.date.to_rfc2822())
        .author(normalize_rss_author(item.author.as_deref(), meta))
        .categories(categories)
        .build()
}

/// Normalize author field to RSS format: "email (Name)"
fn normalize_rss_author(author: Option<&str>, meta: &FeedMetadata) -> Option<String> {
    static RE_VALID_AUTHOR: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}[ \t]*\([^)]+\)$")
            .expect("author pattern is valid")
    });

    let author = author?;

    // Check if item author is already valid
    if RE_VALID_AUTHOR.is_match(author) {
        return Some(author.to_string());
    }

    // Try site author
    if RE_VALID_AUTHOR.is_match(&meta.author) {
        return Some(meta.author.clone());
    }

    // Combine site email and the item's author name
    if meta.email.is_empty() {
        return None;
    }
    Some(format!("{} ({})", meta.email, author))
}
