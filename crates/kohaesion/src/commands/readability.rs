//! Readability command: LIX, Wiener Sachtextformel and Flesch Reading Ease.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use kohaesion_core::config::Config;
use kohaesion_core::readability::{self, ReadabilityReport};

use super::{load_document, pipeline};

/// Arguments for the `readability` subcommand.
#[derive(Args, Debug)]
pub struct ReadabilityArgs {
    /// File to analyze.
    pub file: Utf8PathBuf,
}

/// Score readability of a file.
#[instrument(name = "cmd_readability", skip_all, fields(file = %args.file))]
pub fn cmd_readability(
    args: ReadabilityArgs,
    global_json: bool,
    config: &Config,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = %args.file, "executing readability command");

    let pipeline = pipeline(config)?;
    let document = load_document(&args.file, &pipeline, config, max_input_bytes)?;
    let report = readability::check_readability(&document)
        .with_context(|| format!("failed to check readability of {}", args.file))?;

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&args, &report);
    }

    Ok(())
}

fn print_report(args: &ReadabilityArgs, report: &ReadabilityReport) {
    let counts = &report.counts;
    println!(
        "{} {} sentences, {} words, {} syllables",
        args.file.bold(),
        counts.sentences,
        counts.words,
        counts.syllables,
    );
    if let Some(lix) = report.lix {
        println!("  {} {:.1}", "LIX:".cyan(), lix);
    }
    if let Some(wstf) = report.wiener_sachtextformel {
        println!("  {} {:.1}", "Wiener Sachtextformel:".cyan(), wstf);
    }
    println!(
        "  {} {:.1}",
        "Flesch Reading Ease:".cyan(),
        report.flesch_reading_ease
    );
}
