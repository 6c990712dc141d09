//! Command implementations.

use std::time::Duration;

use anyhow::Context;
use camino::Utf8Path;
use indicatif::{ProgressBar, ProgressStyle};

use kohaesion_core::config::Config;
use kohaesion_core::nlp::Pipeline;
use kohaesion_core::semantic::{SpaceConfig, corpus};
use kohaesion_core::{Document, DocumentLoader, SemanticSpace};

pub mod analyze;
pub mod info;
pub mod readability;
pub mod space;

/// Load a document with the configured pipeline and validate its size
/// against the configured limit.
///
/// Markdown files are reduced to prose.
pub fn load_document(
    path: &Utf8Path,
    pipeline: &Pipeline,
    config: &Config,
    max_bytes: Option<usize>,
) -> anyhow::Result<Document> {
    DocumentLoader::new()
        .with_pipeline(pipeline.clone())
        .with_file(path)
        .with_caching(config.cache)
        .with_max_bytes(max_bytes)
        .load()
        .with_context(|| format!("failed to load {path}"))
}

/// Build the configured pipeline.
pub fn pipeline(config: &Config) -> anyhow::Result<Pipeline> {
    config
        .pipeline()
        .context("failed to set up the language pipeline")
}

/// Load the corpus in `dir` and fit a semantic space on it.
///
/// Shows a spinner on stderr while working unless `quiet_progress` is set.
pub fn build_space(
    dir: &Utf8Path,
    pipeline: &Pipeline,
    space_config: &SpaceConfig,
    max_bytes: Option<usize>,
    quiet_progress: bool,
) -> anyhow::Result<SemanticSpace> {
    let spinner = if quiet_progress {
        ProgressBar::hidden()
    } else {
        ProgressBar::new_spinner()
    };
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    spinner.enable_steady_tick(Duration::from_millis(100));

    spinner.set_message(format!("loading corpus from {dir}"));
    let documents = corpus::load_dir(dir, pipeline, max_bytes)
        .with_context(|| format!("failed to load corpus from {dir}"))?;

    spinner.set_message(format!(
        "fitting {} components on {} documents",
        space_config.n_components,
        documents.len()
    ));
    let space = SemanticSpace::build(&documents, space_config)
        .with_context(|| format!("failed to build semantic space from {dir}"))?;

    spinner.finish_and_clear();
    Ok(space)
}
