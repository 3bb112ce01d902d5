//! `check`: run every load, parse and render step without writing.

use super::build::{collect_documents, render_artifacts};
use crate::{
    config::{SiteConfig, ThemeChoice},
    links::LinkRegistry,
    log,
    utils::plural_count,
};
use anyhow::Result;

pub fn check_site(config: &SiteConfig, registry: &LinkRegistry) -> Result<()> {
    registry.log_summary();

    let docs = collect_documents(config)?;
    let artifacts = render_artifacts(config, registry, &docs)?;
    for artifact in &artifacts {
        log!("check"; "would write {}", artifact.display_path(config.get_root()));
    }

    log_markdown_settings(config);
    log!("check"; "ok, {} to write", plural_count(artifacts.len(), "file"));
    Ok(())
}

/// Print the pass-through settings read by the site framework.
fn log_markdown_settings(config: &SiteConfig) {
    let markdown = &config.markdown;
    let theme = match markdown.shiki.theme_choice(config.get_root()) {
        Some(ThemeChoice::Builtin(name)) => name.to_string(),
        Some(ThemeChoice::Custom(path)) => config.root_relative(path).display().to_string(),
        None => markdown.shiki.theme.clone(),
    };
    let langs = if markdown.shiki.langs.is_empty() {
        "default".to_string()
    } else {
        markdown.shiki.langs.join(", ")
    };

    log!("markdown"; "footnote label: {}", markdown.footnote_label);
    log!("markdown"; "shiki theme: {}, langs: {}, wrap: {}", theme, langs, markdown.shiki.wrap);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_site_config;
    use std::fs;

    #[test]
    fn test_check_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("content/posts")).unwrap();
        fs::write(
            dir.path().join("content/posts/a.md"),
            "---\ntitle: A\ndate: 2020-01-01\n---\n",
        )
        .unwrap();
        let config = test_site_config(dir.path(), "");

        check_site(&config, &LinkRegistry::default()).unwrap();
        assert!(!config.build.output.exists());
    }

    #[test]
    fn test_check_reports_bad_document() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("content/posts")).unwrap();
        fs::write(dir.path().join("content/posts/a.md"), "no front-matter").unwrap();
        let config = test_site_config(dir.path(), "");

        assert!(check_site(&config, &LinkRegistry::default()).is_err());
    }
}
