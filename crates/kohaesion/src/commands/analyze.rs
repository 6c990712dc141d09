//! Analyze command: the full metric report for one document.

use std::sync::Arc;

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use kohaesion_core::config::Config;
use kohaesion_core::metric::{AnalysisReport, Category, MetricRow};
use kohaesion_core::{MetricContext, analyze, catalogue};

use super::{build_space, load_document, pipeline};

/// Arguments for the `analyze` subcommand.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// File to analyze.
    pub file: Utf8PathBuf,

    /// Metric codes or categories to run (comma-separated). Omit for all.
    #[arg(long, value_delimiter = ',')]
    pub checks: Option<Vec<String>>,

    /// Run every metric of a category (repeatable).
    #[arg(long, value_enum)]
    pub category: Vec<Category>,

    /// Reference corpus directory for the LSA metrics.
    #[arg(long, value_name = "DIR")]
    pub corpus: Option<Utf8PathBuf>,

    /// Latent dimensions of the semantic space.
    #[arg(long)]
    pub components: Option<usize>,
}

impl AnalyzeArgs {
    fn selection(&self) -> Option<Vec<String>> {
        let mut selection = self.checks.clone().unwrap_or_default();
        selection.extend(self.category.iter().map(|c| c.as_str().to_string()));
        (!selection.is_empty()).then_some(selection)
    }
}

/// Compute the selected metrics for a file.
#[instrument(name = "cmd_analyze", skip_all, fields(file = %args.file))]
pub fn cmd_analyze(
    args: AnalyzeArgs,
    global_json: bool,
    config: &Config,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = %args.file, checks = ?args.checks, "executing analyze command");

    let pipeline = pipeline(config)?;
    let document = load_document(&args.file, &pipeline, config, max_input_bytes)?;

    let mut context = MetricContext::new().with_stem_level(config.tag_level);
    if let Some(dir) = args.corpus.as_ref().or(config.corpus_dir.as_ref()) {
        let mut space_config = config.space_config();
        if let Some(n) = args.components {
            space_config.n_components = n;
        }
        let space = build_space(dir, &pipeline, &space_config, max_input_bytes, global_json)?;
        context = context.with_space(Arc::new(space));
    }
    if let Some(table) = config
        .frequency_table()
        .context("failed to load frequency table")?
    {
        context = context.with_frequencies(Arc::new(table));
    }

    let metrics = catalogue(&context);
    let selection = args.selection();
    let report = analyze(&document, &metrics, selection.as_deref())
        .with_context(|| format!("failed to analyze {}", args.file))?;

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&args, &report);
    }
    Ok(())
}

fn print_report(args: &AnalyzeArgs, report: &AnalysisReport) {
    println!("{}", args.file.bold());

    let mut current: Option<Category> = None;
    for row in &report.metrics {
        if current != Some(row.category) {
            println!("\n  {}", format!("{}:", row.category).cyan());
            current = Some(row.category);
        }
        print_row(row);
    }

    let failures = report.failures();
    if failures > 0 {
        println!(
            "\n  {} of {} metrics could not be computed",
            failures,
            report.metrics.len()
        );
    }
}

fn print_row(row: &MetricRow) {
    match (&row.value, &row.error) {
        (Some(value), _) => println!("    {:<10} {:<42} {}", row.code, row.name, value),
        (None, Some(failure)) => println!(
            "    {:<10} {:<42} {}",
            row.code,
            row.name,
            failure.message.dimmed()
        ),
        (None, None) => println!("    {:<10} {}", row.code, row.name),
    }
}
