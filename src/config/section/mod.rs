//! Configuration section definitions.
//!
//! Each module corresponds to a section in `starlog.toml`:
//!
//! | Module     | TOML Section   | Purpose                               |
//! |------------|----------------|---------------------------------------|
//! | `build`    | `[build]`      | Paths, minification, feed settings    |
//! | `links`    | `[links]`      | Bookmark registry and its exports     |
//! | `markdown` | `[markdown]`   | Renderer settings passed through      |
//! | `site`     | `[site]`       | Site info                             |

pub mod build;
mod links;
mod markdown;
pub mod site;

pub use build::{BuildSectionConfig, FeedConfig, FeedFormat, FeedOrder};
pub use links::{DEFAULT_LINKS_FILE, LinksConfig};
pub use markdown::{MarkdownConfig, ThemeChoice};
pub use site::SiteSectionConfig;
