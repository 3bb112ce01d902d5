//! Build orchestration.
//!
//! Build phases:
//! - **Collect** - Discover and parse feed documents (parallel)
//! - **Render** - Feed, bookmark feed and `links.json`, all in memory
//! - **Stage** - Write every file to a scratch directory beside the output
//! - **Clean** - Remove the output directory when `--clean` is given
//! - **Commit** - Move the staged files into the output directory

use crate::{
    config::SiteConfig,
    content::{Document, load_documents},
    generator::{
        Artifact, StagedOutput,
        feed::{feed_artifact, links_feed_artifact},
        links_json_artifact,
    },
    links::LinkRegistry,
    log,
    utils::plural_count,
};
use anyhow::{Result, bail};
use std::fs;

/// Run the build: render everything, stage it, then move it into place.
pub fn build_site(config: &SiteConfig, registry: &LinkRegistry) -> Result<Vec<Artifact>> {
    registry.log_summary();

    let docs = collect_documents(config)?;
    let artifacts = render_artifacts(config, registry, &docs)?;
    let staged = StagedOutput::stage(&config.build.output, &artifacts)?;

    if config.build.clean {
        clean_output(config)?;
    }

    staged.commit()?;
    for artifact in &artifacts {
        log!("build"; "{}", artifact.display_path(config.get_root()));
    }

    log!("build"; "done, {} written", plural_count(artifacts.len(), "file"));
    Ok(artifacts)
}

/// Parse feed documents, or nothing when the feed is disabled.
pub fn collect_documents(config: &SiteConfig) -> Result<Vec<Document>> {
    if !config.build.feed.enable {
        return Ok(Vec::new());
    }
    let docs = load_documents(config)?;
    log!("feed"; "{}", plural_count(docs.len(), "post"));
    Ok(docs)
}

/// Render every output file without touching the output directory.
pub fn render_artifacts(
    config: &SiteConfig,
    registry: &LinkRegistry,
    docs: &[Document],
) -> Result<Vec<Artifact>> {
    let output = &config.build.output;
    let mut artifacts = Vec::new();

    if let Some(feed) = feed_artifact(config, docs)? {
        artifacts.push(feed);
    }
    if config.links.export {
        artifacts.push(links_json_artifact(
            registry,
            output,
            &config.links.export_path,
        )?);
    }
    if let Some(feed) = links_feed_artifact(config, registry)? {
        artifacts.push(feed);
    }

    Ok(artifacts)
}

/// Remove the output directory.
fn clean_output(config: &SiteConfig) -> Result<()> {
    let output = &config.build.output;
    if output == config.get_root() || config.build.content.starts_with(output) {
        bail!(
            "refusing to clean `{}`: it contains the site sources",
            output.display()
        );
    }
    if output.exists() {
        fs::remove_dir_all(output)?;
        crate::debug!("build"; "removed {}", output.display());
    }
    Ok(())
}
