//! Shared helpers with no dependency on config or content.
//!
//! - [`date`]: `DateTimeUtc` parsing and feed date formats
//! - [`path`]: filesystem path normalization and permalink helpers
//! - [`plural`]: count formatting for log lines

pub mod date;
pub mod path;
mod plural;

pub use plural::plural_count;
