//! Bookmark record as stored in `links.toml` and exported to `links.json`.

use crate::utils::date::DateTimeUtc;
use serde::{Deserialize, Serialize, Serializer};

/// A bookmark as written by hand in the registry file.
///
/// Every field defaults so that a record missing several fields is reported
/// once with all its problems instead of failing on the first one.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawBookmark {
    pub name: String,
    #[serde(rename = "dateAdded", alias = "date_added")]
    pub date_added: String,
    pub url: String,
    pub tags: Vec<String>,
}

/// A validated bookmark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookmarkRecord {
    /// Display title.
    pub name: String,
    /// Day the link was added.
    #[serde(rename = "dateAdded", serialize_with = "serialize_date")]
    pub date_added: DateTimeUtc,
    /// Absolute http(s) URL.
    pub url: String,
    /// Labels, first occurrence order, no duplicates.
    pub tags: Vec<String>,
}

fn serialize_date<S: Serializer>(date: &DateTimeUtc, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&date.to_iso_date())
}

/// One problem with one raw record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordIssue {
    /// 1-based position in the registry file.
    pub position: usize,
    pub field: &'static str,
    pub message: String,
}

impl RawBookmark {
    /// Validate into a [`BookmarkRecord`], or return every issue found.
    pub fn validate(self, position: usize) -> Result<BookmarkRecord, Vec<RecordIssue>> {
        let mut issues = Vec::new();
        let mut issue = |field: &'static str, message: String| {
            issues.push(RecordIssue {
                position,
                field,
                message,
            });
        };

        let name = self.name.trim().to_string();
        if name.is_empty() {
            issue("name", "missing or empty".into());
        }

        let date_added = DateTimeUtc::parse_date(self.date_added.trim());
        if date_added.is_none() {
            if self.date_added.is_empty() {
                issue("dateAdded", "missing".into());
            } else {
                issue(
                    "dateAdded",
                    format!("'{}' is not a YYYY-MM-DD date", self.date_added),
                );
            }
        }

        let url = self.url.trim().to_string();
        match url::Url::parse(&url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
            Ok(parsed) => issue(
                "url",
                format!("scheme '{}' not supported, must be http or https", parsed.scheme()),
            ),
            Err(_) if url.is_empty() => issue("url", "missing".into()),
            Err(e) => issue("url", format!("'{url}' is not an absolute URL ({e})")),
        }

        let mut tags: Vec<String> = Vec::with_capacity(self.tags.len());
        for tag in self.tags {
            let tag = tag.trim();
            if tag.is_empty() {
                issue("tags", "contains a blank tag".into());
            } else if !tags.iter().any(|t| t == tag) {
                tags.push(tag.to_string());
            }
        }

        match date_added {
            Some(date_added) if issues.is_empty() => Ok(BookmarkRecord {
                name,
                date_added,
                url,
                tags,
            }),
            _ => Err(issues),
        }
    }
}
