//! Content discovery: walk the content directory and keep glob matches.

use super::ContentError;
use crate::utils::path::to_slash;
use globset::GlobMatcher;
use jwalk::WalkDir;
use std::path::{Path, PathBuf};

const IGNORED_FILES: &[&str] = &[".DS_Store"];

/// A matched content file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Absolute path.
    pub path: PathBuf,
    /// Path relative to the content directory.
    pub relative: PathBuf,
}

/// Compile a `/`-separated glob such as `posts/*.{md,mdx}`.
///
/// `*` does not cross directories; use `**` for that.
pub fn compile_glob(pattern: &str) -> Result<GlobMatcher, ContentError> {
    globset::GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|err| ContentError::Glob(pattern.to_string(), err))
}

/// Collect files under `root` matching `pattern`.
///
/// The walk visits siblings sorted by name, depth first, so the result is in
/// path order.
pub fn discover(root: &Path, pattern: &str) -> Result<Vec<SourceFile>, ContentError> {
    let matcher = compile_glob(pattern)?;

    if !root.is_dir() {
        return Err(ContentError::MissingDir(root.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort(true) {
        let entry = entry.map_err(|err| ContentError::Walk(root.to_path_buf(), err))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_str().unwrap_or_default();
        if IGNORED_FILES.contains(&name) {
            continue;
        }

        let path = entry.path();
        let Ok(relative) = path.strip_prefix(root) else {
            continue;
        };
        if matcher.is_match(to_slash(relative)) {
            files.push(SourceFile {
                relative: relative.to_path_buf(),
                path,
            });
        }
    }
    Ok(files)
}
