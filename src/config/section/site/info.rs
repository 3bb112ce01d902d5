//! `[site.info]` configuration.
//!
//! Site-level metadata: the feed channel's title, description and link all
//! come from here.

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::Deserialize;

/// Site metadata for feed generation.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteInfoConfig {
    /// Site title.
    pub title: String,

    /// Author name.
    pub author: String,

    /// Author email.
    pub email: String,

    /// Site description.
    pub description: String,

    /// Site base URL, used as the channel link and to resolve item links
    /// (e.g., "https://example.com" or "https://example.github.io/blog").
    pub url: Option<String>,

    /// Language code (e.g., "en", "zh-Hans").
    pub language: String,
}

impl Default for SiteInfoConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            email: String::new(),
            description: String::new(),
            url: None,
            language: "en".into(),
        }
    }
}

impl SiteInfoConfig {
    pub const TITLE: FieldPath = FieldPath::new("site.info.title");
    pub const URL: FieldPath = FieldPath::new("site.info.url");

    /// Validate site configuration.
    ///
    /// `feed_switch` is the enabled option that needs a site URL, if any.
    ///
    /// # Checks
    /// - If a feed is enabled, `url` must be set
    /// - `url` must be a valid URL with scheme (e.g., `https://example.com`)
    /// - An empty `title` with a feed enabled is only a warning
    pub fn validate(&self, feed_switch: Option<FieldPath>, diag: &mut ConfigDiagnostics) {
        if let Some(switch) = feed_switch
            && self.url.is_none()
        {
            diag.error_with_hint(
                Self::URL,
                format!("{} is enabled but {} is not configured", switch, Self::URL),
                format!("set {}, e.g.: \"https://example.com\"", Self::URL),
            );
        }

        if feed_switch.is_some() && self.title.trim().is_empty() {
            diag.warn(Self::TITLE, "feed channel will have an empty title");
        }

        // URL format check using url crate for strict validation
        if let Some(url_str) = &self.url {
            match url::Url::parse(url_str) {
                Ok(parsed) => {
                    if !matches!(parsed.scheme(), "http" | "https") {
                        diag.error_with_hint(
                            Self::URL,
                            format!(
                                "scheme '{}' not supported, must be http or https",
                                parsed.scheme()
                            ),
                            "use format like https://example.com",
                        );
                    }
                    if parsed.host_str().is_none() {
                        diag.error_with_hint(
                            Self::URL,
                            "URL must have a valid host",
                            "use format like https://example.com",
                        );
                    }
                }
                Err(e) => {
                    diag.error_with_hint(
                        Self::URL,
                        format!("invalid URL: {e}"),
                        "use format like https://example.com",
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::section::{FeedConfig, LinksConfig};

    fn info(url: Option<&str>) -> SiteInfoConfig {
        SiteInfoConfig {
            title: "Test".into(),
            url: url.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_feed_requires_url() {
        let mut diag = ConfigDiagnostics::new();
        info(None).validate(Some(FeedConfig::ENABLE), &mut diag);
        assert_eq!(diag.errors().len(), 1);
        assert_eq!(diag.errors()[0].field, SiteInfoConfig::URL);
    }

    #[test]
    fn test_links_feed_requires_url() {
        let mut diag = ConfigDiagnostics::new();
        info(None).validate(Some(LinksConfig::FEED), &mut diag);
        assert_eq!(diag.errors().len(), 1);
        assert!(diag.errors()[0].message.contains("links.feed"));
    }

    #[test]
    fn test_url_optional_without_feed() {
        let mut diag = ConfigDiagnostics::new();
        info(None).validate(None, &mut diag);
        assert!(!diag.has_errors());
    }

    #[test]
    fn test_url_scheme_and_syntax() {
        let mut diag = ConfigDiagnostics::new();
        info(Some("ftp://example.com")).validate(Some(FeedConfig::ENABLE), &mut diag);
        assert!(diag.has_errors());

        let mut diag = ConfigDiagnostics::new();
        info(Some("example.com")).validate(Some(FeedConfig::ENABLE), &mut diag);
        assert!(diag.has_errors());

        let mut diag = ConfigDiagnostics::new();
        info(Some("https://mimmyjau.github.io")).validate(Some(FeedConfig::ENABLE), &mut diag);
        assert!(!diag.has_errors());
    }

    #[test]
    fn test_empty_title_warns() {
        let mut diag = ConfigDiagnostics::new();
        let mut site = info(Some("https://example.com"));
        site.title.clear();
        site.validate(Some(FeedConfig::ENABLE), &mut diag);
        assert!(!diag.has_errors());
        assert_eq!(diag.warnings().len(), 1);
    }
}
