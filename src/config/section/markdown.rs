//! `[markdown]` section configuration.
//!
//! These settings belong to the external site framework that renders
//! Markdown/MDX. They are validated here and otherwise passed through.
//!
//! # Example
//!
//! ```toml
//! [markdown]
//! footnote_label = "footnotes"
//!
//! [markdown.shiki]
//! theme = "material-theme-palenight"   # built-in name, or path to a .json theme
//! langs = []
//! wrap = true
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use rustc_hash::FxHashSet;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Themes bundled with Shiki.
pub const BUILTIN_THEMES: &[&str] = &[
    "css-variables",
    "dark-plus",
    "dracula",
    "dracula-soft",
    "github-dark",
    "github-dark-dimmed",
    "github-light",
    "hc_light",
    "light-plus",
    "material-theme",
    "material-theme-darker",
    "material-theme-lighter",
    "material-theme-ocean",
    "material-theme-palenight",
    "min-dark",
    "min-light",
    "monokai",
    "nord",
    "one-dark-pro",
    "poimandres",
    "rose-pine",
    "rose-pine-dawn",
    "rose-pine-moon",
    "slack-dark",
    "slack-ochin",
    "solarized-dark",
    "solarized-light",
    "vitesse-dark",
    "vitesse-light",
];

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    /// Heading text of the generated footnotes section.
    pub footnote_label: String,

    /// Syntax highlighting settings.
    pub shiki: ShikiConfig,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            footnote_label: "footnotes".into(),
            shiki: ShikiConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ShikiConfig {
    /// Built-in theme name or path to a custom theme file.
    pub theme: String,
    /// Extra grammars to load.
    pub langs: Vec<String>,
    /// Wrap long lines instead of scrolling horizontally.
    pub wrap: bool,
}

impl Default for ShikiConfig {
    fn default() -> Self {
        Self {
            theme: "material-theme-palenight".into(),
            langs: Vec::new(),
            wrap: true,
        }
    }
}

/// Resolved highlighting theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeChoice {
    Builtin(&'static str),
    Custom(PathBuf),
}

impl ShikiConfig {
    pub const THEME: FieldPath = FieldPath::new("markdown.shiki.theme");
    pub const LANGS: FieldPath = FieldPath::new("markdown.shiki.langs");

    /// Resolve `theme` to a built-in name or a custom theme file under `root`.
    pub fn theme_choice(&self, root: &Path) -> Option<ThemeChoice> {
        let theme = self.theme.trim();
        if let Some(name) = BUILTIN_THEMES.iter().copied().find(|t| *t == theme) {
            return Some(ThemeChoice::Builtin(name));
        }
        if theme.ends_with(".json") {
            return Some(ThemeChoice::Custom(root.join(theme)));
        }
        None
    }

    fn validate(&self, root: &Path, diag: &mut ConfigDiagnostics) {
        match self.theme_choice(root) {
            Some(ThemeChoice::Builtin(_)) => {}
            Some(ThemeChoice::Custom(path)) => {
                if !path.is_file() {
                    diag.error(
                        Self::THEME,
                        format!("custom theme `{}` not found", path.display()),
                    );
                }
            }
            None => diag.error_with_hint(
                Self::THEME,
                format!("unknown theme '{}'", self.theme),
                "use a built-in Shiki theme name or a path ending in .json",
            ),
        }

        let mut seen = FxHashSet::default();
        for lang in &self.langs {
            let lang = lang.trim();
            if lang.is_empty() {
                diag.error(Self::LANGS, "language names must not be blank");
            } else if !seen.insert(lang) {
                diag.warn(Self::LANGS, format!("'{lang}' is listed more than once"));
            }
        }
    }
}

impl MarkdownConfig {
    pub const FOOTNOTE_LABEL: FieldPath = FieldPath::new("markdown.footnote_label");

    pub fn validate(&self, root: &Path, diag: &mut ConfigDiagnostics) {
        if self.footnote_label.trim().is_empty() {
            diag.error(Self::FOOTNOTE_LABEL, "must not be empty");
        }
        self.shiki.validate(root, diag);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.markdown.footnote_label, "footnotes");
        assert_eq!(config.markdown.shiki.theme, "material-theme-palenight");
        assert!(config.markdown.shiki.langs.is_empty());
        assert!(config.markdown.shiki.wrap);
    }

    #[test]
    fn test_custom_values() {
        let config = test_parse_config(
            "[markdown]\nfootnote_label = \"notes\"\n[markdown.shiki]\ntheme = \"nord\"\nlangs = [\"rust\"]\nwrap = false",
        );
        assert_eq!(config.markdown.footnote_label, "notes");
        assert_eq!(config.markdown.shiki.langs, vec!["rust"]);
        assert!(!config.markdown.shiki.wrap);
        assert_eq!(
            config.markdown.shiki.theme_choice(Path::new("/site")),
            Some(ThemeChoice::Builtin("nord"))
        );
    }

    #[test]
    fn test_unknown_theme_is_error() {
        let shiki = ShikiConfig {
            theme: "palenight-ish".into(),
            ..Default::default()
        };
        let mut diag = ConfigDiagnostics::new();
        shiki.validate(Path::new("/site"), &mut diag);
        assert_eq!(diag.errors().len(), 1);
    }

    #[test]
    fn test_custom_theme_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let shiki = ShikiConfig {
            theme: "themes/mine.json".into(),
            ..Default::default()
        };

        let mut diag = ConfigDiagnostics::new();
        shiki.validate(dir.path(), &mut diag);
        assert!(diag.has_errors());

        std::fs::create_dir_all(dir.path().join("themes")).unwrap();
        std::fs::write(dir.path().join("themes/mine.json"), "{}").unwrap();
        let mut diag = ConfigDiagnostics::new();
        shiki.validate(dir.path(), &mut diag);
        assert!(!diag.has_errors());
    }

    #[test]
    fn test_langs_blank_and_duplicate() {
        let shiki = ShikiConfig {
            langs: vec!["rust".into(), " ".into(), "rust".into()],
            ..Default::default()
        };
        let mut diag = ConfigDiagnostics::new();
        shiki.validate(Path::new("/site"), &mut diag);
        assert_eq!(diag.errors().len(), 1);
        assert_eq!(diag.warnings().len(), 1);
    }
}
