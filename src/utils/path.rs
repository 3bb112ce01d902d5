//! Path and URL utilities.
//!
//! Pure functions, no side effects beyond `canonicalize()`.
//!
//! - [`normalize_path`]: absolute filesystem path
//! - [`to_slash`]: `/`-separated form of a relative path (glob matching)
//! - [`permalink_for`]: URL path of a content document
//! - [`resolve_link`]: absolute URL from site base + permalink

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use std::path::{Component, Path, PathBuf};

/// Characters escaped inside a URL path segment. Non-ASCII is always encoded.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Normalize a file system path to absolute form.
///
/// Tries `canonicalize()` first (resolves symlinks, `.`, `..`).
/// Falls back to:
/// - Return as-is if already absolute
/// - Join with current directory if relative
#[inline]
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

/// Join the normal components of a relative path with `/`.
///
/// `posts\hello.md` on Windows and `posts/hello.md` elsewhere both give
/// `posts/hello.md`, so glob patterns behave the same on every platform.
pub fn to_slash(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// URL path for a document, given its path relative to the content root.
///
/// The extension is dropped and an `index` file stands for its directory.
/// Each segment is percent-encoded.
///
/// ```ignore
/// permalink_for(Path::new("posts/hello.md"))       -> "/posts/hello"
/// permalink_for(Path::new("posts/trip/index.mdx")) -> "/posts/trip"
/// permalink_for(Path::new("posts/hello world.md")) -> "/posts/hello%20world"
/// permalink_for(Path::new("index.md"))             -> "/"
/// ```
pub fn permalink_for(relative: &Path) -> String {
    let stem = relative.with_extension("");
    let mut parts: Vec<String> = stem
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    if parts.last().is_some_and(|last| last == "index") {
        parts.pop();
    }

    let encoded: Vec<_> = parts
        .iter()
        .map(|segment| utf8_percent_encode(segment, PATH_SEGMENT).to_string())
        .collect();
    format!("/{}", encoded.join("/"))
}

/// Check if a link has a URL scheme (`https:`, `mailto:`, ...).
#[inline]
pub fn is_external_link(link: &str) -> bool {
    link.find(':').is_some_and(|pos| {
        pos > 0
            && link[..pos]
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}

/// Resolve a permalink against the site base URL.
///
/// Links that already carry a scheme are returned unchanged. Everything else
/// is appended to the base with exactly one `/` between them, so a base with
/// a path (`https://host/blog`) keeps that path.
pub fn resolve_link(site: &str, permalink: &str) -> String {
    if is_external_link(permalink) {
        return permalink.to_string();
    }
    let base = site.trim_end_matches('/');
    let path = permalink.trim_start_matches('/');
    format!("{base}/{path}")
}
