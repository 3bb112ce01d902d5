//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Bookmark registry and feed exporter for a static blog
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Output directory path (relative to project root)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Content directory path (relative to project root)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub content: Option<PathBuf>,

    /// Config file path (default: starlog.toml)
    #[arg(short = 'C', long, global = true, default_value = "starlog.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Write the feed and link exports into the output directory
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        build_args: BuildArgs,

        /// Remove the output directory before writing
        #[arg(long)]
        clean: bool,
    },

    /// Validate config, bookmarks and content without writing anything
    #[command(visible_alias = "k")]
    Check {
        #[command(flatten)]
        build_args: BuildArgs,
    },
}

/// Shared arguments for Build and Check
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// Minify the XML output
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub minify: Option<bool>,

    /// Enable feed generation
    #[arg(long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub rss: Option<bool>,

    /// Override site URL for deployment.
    ///
    /// Useful when the production URL differs from the one in starlog.toml,
    /// e.g. a preview deployment:
    ///   starlog build --site-url "https://preview.example.com/blog"
    #[arg(short = 'U', long = "site-url", value_hint = clap::ValueHint::Url)]
    pub site_url: Option<String>,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,

    /// Leave out documents marked `draft: true`
    #[arg(short = 'E', long)]
    pub skip_drafts: bool,
}
