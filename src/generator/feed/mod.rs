//! Feed generation (RSS, Atom).
//!
//! - **RSS 2.0**: default format (`rss.xml`)
//! - **Atom 1.0**: `format = "atom"`
//!
//! The same renderer serves the post feed and the optional bookmark feed.

mod atom;
mod common;
mod rss;

pub use self::atom::render_atom;
pub use common::{FeedError, FeedMetadata};
pub use self::rss::render_rss;

use super::{Artifact, minify_xml};
use crate::{
    config::{FeedFormat, SiteConfig},
    content::Document,
    links::LinkRegistry,
    utils::path::{resolve_link, to_slash},
};
use std::path::Path;

/// Render a feed in the configured format.
///
/// `path` is the feed's location inside the output directory; Atom uses it
/// for the feed's self link.
pub fn render(meta: &FeedMetadata, format: FeedFormat, path: &Path) -> Result<String, FeedError> {
    match format {
        FeedFormat::Rss => render_rss(meta),
        FeedFormat::Atom => render_atom(meta, &resolve_link(&meta.site, &to_slash(path))),
    }
}

/// Render the post feed, or `None` when feeds are disabled.
pub fn feed_artifact(config: &SiteConfig, docs: &[Document]) -> Result<Option<Artifact>, FeedError> {
    let feed = &config.build.feed;
    if !feed.enable {
        return Ok(None);
    }
    let meta = FeedMetadata::for_documents(config, docs)?;
    let xml = render(&meta, feed.format, &feed.path)?;
    let xml = minify_xml(&xml, config.build.minify).into_owned();
    Ok(Some(Artifact::new(config.build.output.join(&feed.path), xml)))
}

/// Render the bookmark feed, or `None` unless `links.feed` is set.
pub fn links_feed_artifact(
    config: &SiteConfig,
    registry: &LinkRegistry,
) -> Result<Option<Artifact>, FeedError> {
    if !config.links.feed {
        return Ok(None);
    }
    let meta = FeedMetadata::for_links(config, registry)?;
    let xml = render(&meta, config.build.feed.format, &config.links.feed_path)?;
    let xml = minify_xml(&xml, config.build.minify).into_owned();
    Ok(Some(Artifact::new(
        config.build.output.join(&config.links.feed_path),
        xml,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::test_site_config, utils::date::DateTimeUtc};
    use super::common::tests::doc;

    #[test]
    fn test_feed_artifact_rss() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_site_config(dir.path(), "");
        let docs = vec![doc("posts/a.md", "A", DateTimeUtc::from_ymd(2020, 1, 1))];

        let artifact = feed_artifact(&config, &docs).unwrap().unwrap();
        assert_eq!(artifact.path, config.build.output.join("rss.xml"));

        let channel = ::rss::Channel::read_from(artifact.content.as_bytes()).unwrap();
        assert_eq!(channel.items().len(), 1);
        assert_eq!(channel.items()[0].link(), Some("https://example.com/posts/a"));
    }

    #[test]
    fn test_feed_artifact_atom_self_link() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_site_config(dir.path(), "[build.feed]\nformat = \"atom\"\npath = \"feeds/atom.xml\"");

        let artifact = feed_artifact(&config, &[]).unwrap().unwrap();
        assert!(artifact.path.ends_with("feeds/atom.xml"));

        let feed: atom_syndication::Feed = artifact.content.parse().unwrap();
        assert!(
            feed.links()
                .iter()
                .any(|l| l.href() == "https://example.com/feeds/atom.xml")
        );
    }

    #[test]
    fn test_feed_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = test_site_config(dir.path(), "");
        config.build.feed.enable = false;
        assert!(feed_artifact(&config, &[]).unwrap().is_none());
    }

    #[test]
    fn test_feed_requires_site() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = test_site_config(dir.path(), "");
        config.site.info.url = None;
        assert!(matches!(
            feed_artifact(&config, &[]),
            Err(FeedError::MissingSite)
        ));
    }

    #[test]
    fn test_minified_output() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = test_site_config(dir.path(), "");
        config.build.minify = true;
        let artifact = feed_artifact(&config, &[]).unwrap().unwrap();
        assert!(!artifact.content.contains(">\n<"));
        assert!(::rss::Channel::read_from(artifact.content.as_bytes()).is_ok());
    }

    #[test]
    fn test_links_feed_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = test_site_config(dir.path(), "");
        let registry = LinkRegistry::parse(
            "[[links]]\nname = \"Fun\"\ndateAdded = \"2021-03-22\"\nurl = \"https://fun.example/x\"\ntags = [\"video\"]\n",
            Path::new("links.toml"),
        )
        .unwrap();

        assert!(links_feed_artifact(&config, &registry).unwrap().is_none());

        config.links.feed = true;
        let artifact = links_feed_artifact(&config, &registry).unwrap().unwrap();
        assert_eq!(artifact.path, config.build.output.join("links.xml"));

        let channel = ::rss::Channel::read_from(artifact.content.as_bytes()).unwrap();
        assert_eq!(channel.title(), "Test links");
        assert_eq!(channel.items()[0].link(), Some("https://fun.example/x"));
        assert_eq!(channel.items()[0].pub_date(), Some("Mon, 22 Mar 2021 00:00:00 GMT"));
    }
}
