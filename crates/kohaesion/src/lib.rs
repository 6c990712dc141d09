//! Argument parser and commands of the `kohaesion` CLI.
//!
//! `main.rs` parses a [`Cli`], loads the layered configuration, applies the
//! analysis flags on top of it with [`Cli::apply_overrides`] and dispatches
//! to one of the [`Commands`]. [`command()`] exposes the clap command for
//! man pages and shell completions.

pub mod commands;

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use kohaesion_core::{Config, Language, TagLevel};

/// When to colorize terminal output.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Color when stdout is a terminal.
    #[default]
    Auto,
    /// Always color.
    Always,
    /// Never color.
    Never,
}

impl ColorChoice {
    /// Set the owo-colors override. `Auto` leaves terminal detection on.
    pub fn apply(self) {
        match self {
            Self::Auto => {}
            Self::Always => owo_colors::set_override(true),
            Self::Never => owo_colors::set_override(false),
        }
    }
}

const ENV_HELP: &str = "\
ENVIRONMENT VARIABLES:
    RUST_LOG                 Log filter (e.g., debug, kohaesion_core=trace)
    KOHAESION_LOG_PATH       Explicit log file path
    KOHAESION_LOG_DIR        Log directory
    KOHAESION_LANGUAGE       Document language (german, english, ...)
    KOHAESION_TAG_LEVEL      Stem metrics tag level (1, 2, 3)
    KOHAESION_CORPUS_DIR     Reference corpus for LSA metrics
    KOHAESION_N_COMPONENTS   Latent dimensions of the semantic space
    KOHAESION_LEXICON        Extra tagger lexicon
    KOHAESION_FREQUENCIES    Word frequency table

Variables override configuration files; --language, --tag-level and
--no-cache override both.
";

/// kohaesion command line.
#[derive(Parser)]
#[command(name = "kohaesion")]
#[command(about = "Cohesion and readability indices for German text", long_about = None)]
#[command(version, arg_required_else_help = true)]
#[command(after_long_help = ENV_HELP)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Print only the version number (for scripting)
    #[arg(long)]
    pub version_only: bool,

    /// Configuration file to use instead of discovered ones
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Run as if started in DIR
    #[arg(short = 'C', long, global = true)]
    pub chdir: Option<PathBuf>,

    /// Language of the analyzed text (overrides configuration)
    #[arg(short = 'l', long, global = true, value_name = "LANG")]
    pub language: Option<Language>,

    /// Tag level for the stem overlap metrics: 1 lemma, 2 stem, 3 detailed
    #[arg(long, global = true, value_name = "LEVEL", value_parser = parse_tag_level)]
    pub tag_level: Option<TagLevel>,

    /// Recompute document views on every access
    #[arg(long, global = true)]
    pub no_cache: bool,

    /// Only print errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// More log detail (repeatable)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Colorize output
    #[arg(long, global = true, value_enum, default_value_t)]
    pub color: ColorChoice,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    pub json: bool,
}

impl Cli {
    /// Apply the analysis flags on top of the loaded configuration.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(language) = &self.language {
            config.language = language.clone();
        }
        if let Some(level) = self.tag_level {
            config.tag_level = level;
        }
        if self.no_cache {
            config.cache = false;
        }
    }
}

fn parse_tag_level(raw: &str) -> Result<TagLevel, String> {
    let level: u8 = raw
        .parse()
        .map_err(|_| format!("`{raw}` is not a number"))?;
    TagLevel::try_from(level)
}

/// kohaesion subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Compute cohesion, readability and word information indices
    Analyze(commands::analyze::AnalyzeArgs),

    /// Score readability (LIX, Wiener Sachtextformel, Flesch)
    Readability(commands::readability::ReadabilityArgs),

    /// Build a semantic space from a corpus and show its dimensions
    Space(commands::space::SpaceArgs),

    /// Show the effective language, providers, corpus and metric catalogue
    Info(commands::info::InfoArgs),
}

/// The clap command, for man pages and completions.
pub fn command() -> clap::Command {
    Cli::command()
}
