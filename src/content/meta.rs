//! Document metadata from front-matter.

use serde::{Deserialize, Deserializer};

/// Tags as a list, a comma-separated string, or `null`.
fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Tags {
        List(Vec<String>),
        Csv(String),
    }

    let tags = match Option::<Tags>::deserialize(deserializer)? {
        Some(Tags::List(list)) => list,
        Some(Tags::Csv(s)) => s.split(',').map(str::to_string).collect(),
        None => Vec::new(),
    };
    Ok(tags
        .into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect())
}

/// Front-matter of a content document.
///
/// | Field         | Aliases              | Required |
/// |---------------|----------------------|----------|
/// | `title`       |                      | yes      |
/// | `date`        | `pubDate`, `pub-date`| yes      |
/// | `description` | `summary`            | no       |
/// | `author`      |                      | no       |
/// | `tags`        |                      | no       |
/// | `draft`       |                      | no       |
/// | `permalink`   |                      | no       |
///
/// Other keys (`layout`, `heroImage`, ...) belong to the site framework and
/// are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DocumentMeta {
    pub title: Option<String>,
    #[serde(alias = "pubDate", alias = "pub-date")]
    pub date: Option<String>,
    #[serde(alias = "summary")]
    pub description: Option<String>,
    pub author: Option<String>,
    #[serde(deserialize_with = "deserialize_tags")]
    pub tags: Vec<String>,
    pub draft: bool,
    /// Custom URL path, or an absolute URL used as-is.
    pub permalink: Option<String>,
}
