//! starlog - bookmark registry and feed exporter for a static blog.

mod cli;
mod config;
mod content;
mod generator;
mod links;
mod logger;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands, build::build_site, check::check_site};
use config::SiteConfig;
use links::LinkRegistry;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = SiteConfig::load(&cli)?;

    // The registry is loaded once and shared read-only by every step
    let registry = LinkRegistry::from_config(&config)?;

    match &cli.command {
        Commands::Build { .. } => build_site(&config, &registry).map(|_| ()),
        Commands::Check { .. } => check_site(&config, &registry),
    }
}
