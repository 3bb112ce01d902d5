//! `links.json` export.
//!
//! The JSON mirrors the registry file: an array of
//! `{ name, dateAdded, url, tags }` objects in file order.

use super::LinkRegistry;
use anyhow::{Context, Result};

/// Serialize the registry as pretty-printed JSON.
pub fn to_json(registry: &LinkRegistry) -> Result<String> {
    serde_json::to_string_pretty(registry.records()).context("failed to serialize bookmarks")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_json_shape_and_order() {
        let registry = LinkRegistry::parse(
            r#"
[[links]]
name = "b"
dateAdded = "2021-01-02"
url = "https://b.example"
tags = ["x", "y"]

[[links]]
name = "a"
dateAdded = "2021-01-01"
url = "https://a.example"
"#,
            Path::new("links.toml"),
        )
        .unwrap();

        let value: serde_json::Value = serde_json::from_str(&to_json(&registry).unwrap()).unwrap();
        let array = value.as_array().unwrap();
        assert_eq!(array.len(), 2);
        assert_eq!(array[0]["name"], "b");
        assert_eq!(array[0]["dateAdded"], "2021-01-02");
        assert_eq!(array[0]["tags"], serde_json::json!(["x", "y"]));
        assert_eq!(array[1]["tags"], serde_json::json!([]));

        let keys: Vec<_> = array[0].as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["name", "dateAdded", "url", "tags"]);
    }
}
