//! Space command: fit a semantic space and show what its dimensions load on.

use anyhow::{Context, bail};
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use kohaesion_core::config::Config;
use kohaesion_core::semantic::WeightedTerm;

use super::{build_space, pipeline};

/// Arguments for the `space` subcommand.
#[derive(Args, Debug)]
pub struct SpaceArgs {
    /// Reference corpus directory (`.txt` and `.md` files).
    #[arg(long, value_name = "DIR")]
    pub corpus: Option<Utf8PathBuf>,

    /// Latent dimensions of the semantic space.
    #[arg(long)]
    pub components: Option<usize>,

    /// Terms to list per dimension.
    #[arg(long, default_value_t = 10)]
    pub top: usize,
}

#[derive(Serialize)]
struct Dimension {
    dimension: usize,
    singular_value: f64,
    terms: Vec<WeightedTerm>,
}

#[derive(Serialize)]
struct SpaceSummary {
    corpus: String,
    documents: usize,
    paragraphs: usize,
    terms: usize,
    n_components: usize,
    rank: usize,
    dimensions: Vec<Dimension>,
}

/// Build a semantic space and summarize it.
#[instrument(name = "cmd_space", skip_all)]
pub fn cmd_space(
    args: SpaceArgs,
    global_json: bool,
    config: &Config,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    let Some(dir) = args.corpus.as_ref().or(config.corpus_dir.as_ref()) else {
        bail!("no corpus given: pass --corpus or set corpus_dir in the configuration");
    };
    debug!(corpus = %dir, components = ?args.components, "executing space command");

    let mut space_config = config.space_config();
    if let Some(n) = args.components {
        space_config.n_components = n;
    }
    let pipeline = pipeline(config)?;
    let space = build_space(dir, &pipeline, &space_config, max_input_bytes, global_json)?;

    let dimensions = (0..space.n_components())
        .map(|dimension| {
            Ok(Dimension {
                dimension,
                singular_value: space.singular_values()[dimension],
                terms: space
                    .top_terms(dimension, args.top)
                    .context("failed to list top terms")?,
            })
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    let summary = SpaceSummary {
        corpus: dir.to_string(),
        documents: space.n_documents(),
        paragraphs: space.paragraph_vectors().nrows(),
        terms: space.vocabulary().len(),
        n_components: space.n_components(),
        rank: space.rank(),
        dimensions,
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!(
        "{} {} documents, {} paragraphs, {} terms, {} dimensions",
        summary.corpus.bold(),
        summary.documents,
        summary.paragraphs,
        summary.terms,
        summary.n_components,
    );
    for dim in &summary.dimensions {
        let terms: Vec<String> = dim
            .terms
            .iter()
            .map(|t| format!("{} ({:.3})", t.term, t.weight))
            .collect();
        println!(
            "  {} {}",
            format!("#{} σ={:.3}:", dim.dimension, dim.singular_value).cyan(),
            terms.join(", ")
        );
    }
    Ok(())
}
