//! Output generators.
//!
//! Everything a build writes is rendered into an [`Artifact`] first, then
//! written to a scratch directory by [`StagedOutput`] and only moved into the
//! output directory once every file is on disk:
//!
//! - **Feed**: RSS/Atom feed of content documents (`rss.xml`)
//! - **Links feed**: optional feed of bookmarks (`links.xml`)
//! - **Links export**: the registry as JSON (`links.json`)

pub mod feed;

use crate::{
    debug,
    links::{self, LinkRegistry},
};
use anyhow::{Context, Result};
use regex::Regex;
use std::{
    borrow::Cow,
    fs,
    path::{Path, PathBuf},
    sync::LazyLock,
};

/// A rendered output file waiting to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Absolute destination path.
    pub path: PathBuf,
    pub content: String,
}

impl Artifact {
    pub fn new(path: PathBuf, content: String) -> Self {
        Self { path, content }
    }

    /// Destination relative to `root`, for log output.
    pub fn display_path(&self, root: &Path) -> String {
        self.path
            .strip_prefix(root)
            .unwrap_or(&self.path)
            .display()
            .to_string()
    }
}

/// Artifacts written to a scratch directory beside the output directory.
///
/// Nothing under the output directory changes until [`StagedOutput::commit`].
/// The scratch directory is removed on drop.
#[derive(Debug)]
pub struct StagedOutput {
    dir: PathBuf,
    /// `(scratch file, destination)` pairs.
    files: Vec<(PathBuf, PathBuf)>,
}

impl StagedOutput {
    /// Write every artifact under `.<output>.staging`. On failure the output
    /// directory is left as it was.
    pub fn stage(output: &Path, artifacts: &[Artifact]) -> Result<Self> {
        let name = output
            .file_name()
            .map_or_else(|| "output".into(), |n| n.to_string_lossy().into_owned());
        let dir = output.with_file_name(format!(".{name}.staging"));
        if dir.exists() {
            fs::remove_dir_all(&dir)
                .with_context(|| format!("failed to remove stale {}", dir.display()))?;
        }

        let mut staged = Self {
            dir,
            files: Vec::with_capacity(artifacts.len()),
        };
        for artifact in artifacts {
            staged.add(output, artifact)?;
        }
        Ok(staged)
    }

    fn add(&mut self, output: &Path, artifact: &Artifact) -> Result<()> {
        let relative = artifact.path.strip_prefix(output).with_context(|| {
            format!(
                "{} is outside the output directory {}",
                artifact.path.display(),
                output.display()
            )
        })?;
        let scratch = self.dir.join(relative);
        write_file(&scratch, &artifact.content)?;
        self.files.push((scratch, artifact.path.clone()));
        Ok(())
    }

    /// Move every staged file to its destination.
    pub fn commit(self) -> Result<()> {
        for (scratch, dest) in &self.files {
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            fs::rename(scratch, dest)
                .with_context(|| format!("failed to move {} into place", dest.display()))?;
        }
        Ok(())
    }
}

impl Drop for StagedOutput {
    fn drop(&mut self) {
        if !self.dir.exists() {
            return;
        }
        if let Err(err) = fs::remove_dir_all(&self.dir) {
            debug!("build"; "cannot remove {}: {}", self.dir.display(), err);
        }
    }
}

/// Write a file, creating parent directories.
fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}

/// Render `links.json`.
pub fn links_json_artifact(registry: &LinkRegistry, output: &Path, path: &Path) -> Result<Artifact> {
    Ok(Artifact::new(output.join(path), links::to_json(registry)?))
}

/// Minify XML content if enabled.
///
/// Removes whitespace between a closing `>` and the next `<`. Text nodes and
/// CDATA sections are left byte-for-byte intact.
pub fn minify_xml(content: &str, enabled: bool) -> Cow<'_, str> {
    static RE_BETWEEN_TAGS: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"(?s)<!\[CDATA\[.*?\]\]>|>[ \t\r\n]+<").expect("minify pattern is valid")
    });

    if !enabled {
        return Cow::Borrowed(content);
    }

    let minified = RE_BETWEEN_TAGS.replace_all(content.trim(), |caps: &regex::Captures<'_>| {
        let matched = &caps[0];
        if matched.starts_with("<![CDATA[") {
            matched.to_string()
        } else {
            "><".to_string()
        }
    });
    Cow::Owned(minified.into_owned())
}
