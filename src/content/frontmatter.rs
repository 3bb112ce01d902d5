//! Front-matter extraction from YAML (`---`) or TOML (`+++`) fences.

use super::DocumentMeta;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("document has no front-matter")]
    Missing,

    #[error("unclosed front-matter block, missing closing `{0}`")]
    Unclosed(&'static str),

    #[error("invalid YAML front-matter: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid TOML front-matter: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fence {
    Yaml,
    Toml,
}

impl Fence {
    const fn marker(self) -> &'static str {
        match self {
            Self::Yaml => "---",
            Self::Toml => "+++",
        }
    }
}

/// Split a document into metadata and body.
pub fn extract(content: &str) -> Result<(DocumentMeta, &str), FrontMatterError> {
    let (raw, body, fence) = detect(content)?;
    let meta = if raw.trim().is_empty() {
        DocumentMeta::default()
    } else {
        match fence {
            Fence::Yaml => serde_yaml::from_str(raw)?,
            Fence::Toml => parse_toml(raw)?,
        }
    };
    Ok((meta, body))
}

/// Locate the fenced block. Returns `(front-matter, body, fence)`.
fn detect(content: &str) -> Result<(&str, &str, Fence), FrontMatterError> {
    let trimmed = content.trim_start_matches('\u{feff}').trim_start();

    let fence = if trimmed.starts_with("---") {
        Fence::Yaml
    } else if trimmed.starts_with("+++") {
        Fence::Toml
    } else {
        return Err(FrontMatterError::Missing);
    };

    let marker = fence.marker();
    let after_open = &trimmed[3..];
    let Some(end) = after_open.find(&format!("\n{marker}")) else {
        return Err(FrontMatterError::Unclosed(marker));
    };

    let raw = after_open[..end].trim_matches(['\r', '\n']);
    let body = after_open[end + 4..].trim_start_matches(['\r', '\n']);
    Ok((raw, body, fence))
}

/// Parse TOML front-matter.
///
/// TOML has a native datetime type; dates are turned back into strings so
/// both fence styles yield the same metadata.
fn parse_toml(raw: &str) -> Result<DocumentMeta, toml::de::Error> {
    let table: toml::Table = toml::from_str(raw)?;
    let value = stringify_datetimes(toml::Value::Table(table));
    value.try_into()
}

fn stringify_datetimes(value: toml::Value) -> toml::Value {
    match value {
        toml::Value::Datetime(dt) => toml::Value::String(dt.to_string()),
        toml::Value::Table(table) => toml::Value::Table(
            table
                .into_iter()
                .map(|(k, v)| (k, stringify_datetimes(v)))
                .collect(),
        ),
        toml::Value::Array(items) => {
            toml::Value::Array(items.into_iter().map(stringify_datetimes).collect())
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_frontmatter() {
        let content = "---\ntitle: Hello\ndate: 2024-01-01\ntags: [a, b]\nlayout: ../layouts/Post.astro\n---\n\n# Body";
        let (meta, body) = extract(content).unwrap();
        assert_eq!(meta.title.as_deref(), Some("Hello"));
        assert_eq!(meta.date.as_deref(), Some("2024-01-01"));
        assert_eq!(meta.tags, vec!["a", "b"]);
        assert_eq!(body, "# Body");
    }

    #[test]
    fn test_yaml_aliases() {
        let content = "---\ntitle: Hello\npubDate: 2022-07-08\nsummary: short\n---\n";
        let (meta, _) = extract(content).unwrap();
        assert_eq!(meta.date.as_deref(), Some("2022-07-08"));
        assert_eq!(meta.description.as_deref(), Some("short"));
    }

    #[test]
    fn test_toml_frontmatter_with_native_date() {
        let content = "+++\ntitle = \"Hello\"\ndate = 2024-01-01\ntags = [\"a\", \"b\"]\n+++\n\n# Body";
        let (meta, body) = extract(content).unwrap();
        assert_eq!(meta.title.as_deref(), Some("Hello"));
        assert_eq!(meta.date.as_deref(), Some("2024-01-01"));
        assert_eq!(meta.tags, vec!["a", "b"]);
        assert_eq!(body, "# Body");
    }

    #[test]
    fn test_toml_offset_datetime() {
        let content = "+++\ntitle = \"x\"\ndate = 2024-01-01T10:30:00Z\n+++\n";
        let (meta, _) = extract(content).unwrap();
        assert_eq!(meta.date.as_deref(), Some("2024-01-01T10:30:00Z"));
    }

    #[test]
    fn test_crlf_line_endings() {
        let content = "---\r\ntitle: Hello\r\ndate: 2024-01-01\r\n---\r\nbody";
        let (meta, body) = extract(content).unwrap();
        assert_eq!(meta.title.as_deref(), Some("Hello"));
        assert_eq!(meta.date.as_deref(), Some("2024-01-01"));
        assert_eq!(body, "body");
    }

    #[test]
    fn test_empty_frontmatter() {
        let (meta, body) = extract("---\n---\nbody").unwrap();
        assert!(meta.title.is_none());
        assert_eq!(body, "body");
    }

    #[test]
    fn test_missing_frontmatter() {
        let result = extract("# Just Markdown\n\nNo front-matter here.");
        assert!(matches!(result, Err(FrontMatterError::Missing)));
    }

    #[test]
    fn test_unclosed_frontmatter() {
        let result = extract("---\ntitle: Test\n# No closing");
        assert!(matches!(result, Err(FrontMatterError::Unclosed("---"))));

        let result = extract("+++\ntitle = \"Test\"\n");
        assert!(matches!(result, Err(FrontMatterError::Unclosed("+++"))));
    }

    #[test]
    fn test_invalid_syntax() {
        let result = extract("---\ntitle: [invalid yaml\n---\n");
        assert!(matches!(result, Err(FrontMatterError::Yaml(_))));

        let result = extract("+++\ntitle = \n+++\n");
        assert!(matches!(result, Err(FrontMatterError::Toml(_))));
    }
}
