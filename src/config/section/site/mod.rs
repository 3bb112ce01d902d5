//! `[site]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [site.info]
//! title = "Mimmy's Blog"
//! description = "A humble Astronaut's guide to the stars"
//! url = "https://mimmyjau.github.io"
//! author = "Mimmy"
//! email = "mimmy@example.com"
//! language = "en"
//! ```

mod info;

pub use info::SiteInfoConfig;

use serde::Deserialize;

/// Site section configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SiteSectionConfig {
    /// Site metadata (title, description, base URL, ...).
    pub info: SiteInfoConfig,
}
