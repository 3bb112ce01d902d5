//! Atom 1.0 feed rendering.

use super::common::{FeedError, FeedItem, FeedMetadata};
use crate::utils::date::DateTimeUtc;
use atom_syndication::{
    CategoryBuilder, Entry, EntryBuilder, Feed, FeedBuilder, FixedDateTime, GeneratorBuilder,
    Link, LinkBuilder, Person, PersonBuilder, Text,
};

/// Render an Atom feed. `self_href` is the feed's own absolute URL.
pub fn render_atom(meta: &FeedMetadata, self_href: &str) -> Result<String, FeedError> {
    let entries = meta
        .items
        .iter()
        .map(to_atom_entry)
        .collect::<Result<Vec<Entry>, _>>()?;

    let updated = to_fixed(meta.latest().unwrap_or(DateTimeUtc::from_ymd(1970, 1, 1)))?;

    let authors: Vec<Person> = if meta.author.is_empty() {
        Vec::new()
    } else {
        vec![
            PersonBuilder::default()
                .name(meta.author.clone())
                .email(Some(meta.email.clone()).filter(|e| !e.is_empty()))
                .build(),
        ]
    };

    let self_link: Link = LinkBuilder::default()
        .href(self_href.to_string())
        .rel("self".to_string())
        .mime_type(Some("application/atom+xml".to_string()))
        .build();

    let alternate_link: Link = LinkBuilder::default()
        .href(meta.site.clone())
        .rel("alternate".to_string())
        .build();

    let feed: Feed = FeedBuilder::default()
        .title(Text::plain(meta.title.clone()))
        .id(meta.site.clone())
        .updated(updated)
        .authors(authors)
        .links(vec![self_link, alternate_link])
        .subtitle(Some(Text::plain(meta.description.clone())))
        .generator(Some(GeneratorBuilder::default().value("starlog").build()))
        .lang(Some(meta.language.clone()))
        .entries(entries)
        .build();

    Ok(feed.to_string())
}

fn to_fixed(date: DateTimeUtc) -> Result<FixedDateTime, FeedError> {
    let rfc3339 = date.to_rfc3339();
    rfc3339.parse().map_err(|_| FeedError::Date(rfc3339))
}

fn to_atom_entry(item: &FeedItem) -> Result<Entry, FeedError> {
    let updated = to_fixed(item.date)?;

    let link: Link = LinkBuilder::default()
        .href(item.link.clone())
        .rel("alternate".to_string())
        .build();

    let authors: Vec<Person> = item
        .author
        .as_ref()
        .map(|name| vec![PersonBuilder::default().name(name.clone()).build()])
        .unwrap_or_default();

    let categories = item
        .categories
        .iter()
        .map(|tag| CategoryBuilder::default().term(tag.clone()).build())
        .collect::<Vec<_>>();

    Ok(EntryBuilder::default()
        .title(Text::plain(item.title.clone()))
        .id(item.link.clone())
        .updated(updated)
        .published(Some(updated))
        .links(vec![link])
        .summary(item.description.clone().map(Text::plain))
        .authors(authors)
        .categories(categories)
        .build())
}

#[cfg(test)]
mod tests {
    use super::super::common::tests::{doc, metadata};
    use super::*;

    #[test]
    fn test_round_trip() {
        let mut b = FeedItem::from_document(
            &doc("posts/b.md", "B", DateTimeUtc::from_ymd(2021, 1, 1)),
            "https://example.com",
        );
        b.categories = vec!["space".into()];
        b.description = Some("Second post".into());
        let meta = metadata(vec![
            FeedItem::from_document(
                &doc("posts/a.md", "A", DateTimeUtc::from_ymd(2020, 1, 1)),
                "https://example.com",
            ),
            b,
        ]);

        let xml = render_atom(&meta, "https://example.com/atom.xml").unwrap();
        let feed: Feed = xml.parse().unwrap();

        assert_eq!(feed.title().as_str(), "Mimmy's Blog");
        assert_eq!(feed.id(), "https://example.com");
        assert!(feed.updated().to_rfc3339().starts_with("2021-01-01"));
        assert_eq!(feed.entries().len(), 2);
        assert!(
            feed.links()
                .iter()
                .any(|l| l.rel() == "self" && l.href() == "https://example.com/atom.xml")
        );

        let a = &feed.entries()[0];
        assert_eq!(a.title().as_str(), "A");
        assert_eq!(a.id(), "https://example.com/posts/a");
        assert_eq!(a.links()[0].href(), "https://example.com/posts/a");
        assert!(a.updated().to_rfc3339().starts_with("2020-01-01"));

        let b = &feed.entries()[1];
        assert_eq!(b.categories()[0].term(), "space");
        assert_eq!(b.summary().map(|s| s.as_str()), Some("Second post"));
    }

    #[test]
    fn test_empty_feed() {
        let xml = render_atom(&metadata(Vec::new()), "https://example.com/atom.xml").unwrap();
        let feed: Feed = xml.parse().unwrap();
        assert!(feed.entries().is_empty());
        assert!(feed.updated().to_rfc3339().starts_with("1970-01-01"));
    }
}
