//! Info command: effective analysis settings, providers, corpus and metrics.

use anyhow::Context;
use camino::Utf8Path;
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use kohaesion_core::config::{Config, ConfigSources};
use kohaesion_core::metric::Category;
use kohaesion_core::nlp::LexiconTagger;
use kohaesion_core::semantic::corpus;
use kohaesion_core::{MetricContext, catalogue};

/// Arguments for the `info` subcommand.
#[derive(Args, Debug, Default)]
pub struct InfoArgs {
    // No subcommand-specific arguments; uses global --json flag
}

#[derive(Serialize)]
struct Settings {
    log_level: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_dir: Option<String>,
    language: String,
    tag_level: u8,
    cache: bool,
    n_components: usize,
    max_input_bytes: Option<usize>,
}

/// A file-backed resource and the number of entries read from it.
#[derive(Serialize)]
struct Table {
    path: String,
    entries: usize,
}

#[derive(Serialize)]
struct Providers {
    tokenizer: &'static str,
    tagger: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    lexicon: Option<Table>,
    hyphenator: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    frequencies: Option<Table>,
}

#[derive(Serialize)]
struct CorpusInfo {
    dir: String,
    /// Corpus files found, `None` when the directory cannot be read.
    files: Option<usize>,
}

#[derive(Serialize)]
struct CategoryCount {
    category: Category,
    metrics: usize,
}

#[derive(Serialize)]
struct Info {
    name: &'static str,
    version: &'static str,
    config_file: Option<String>,
    settings: Settings,
    providers: Providers,
    corpus: Option<CorpusInfo>,
    metrics: Vec<CategoryCount>,
}

impl Info {
    fn gather(config: &Config, sources: &ConfigSources) -> anyhow::Result<Self> {
        let lexicon = config
            .lexicon
            .as_ref()
            .map(|path| -> anyhow::Result<Table> {
                let tagger = LexiconTagger::from_file(path)
                    .with_context(|| format!("failed to read lexicon {path}"))?;
                Ok(table(path, tagger.len()))
            })
            .transpose()?;
        let frequencies = config
            .frequency_table()
            .context("failed to load frequency table")?
            .zip(config.frequencies.as_ref())
            .map(|(frequencies, path)| table(path, frequencies.len()));

        Ok(Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            config_file: sources.primary_file().map(ToString::to_string),
            settings: Settings {
                log_level: config.log_level.as_str(),
                log_dir: config.log_dir.as_ref().map(ToString::to_string),
                language: config.language.to_string(),
                tag_level: config.tag_level.into(),
                cache: config.cache,
                n_components: config.n_components,
                max_input_bytes: config.max_input(),
            },
            providers: Providers {
                tokenizer: "rule-based",
                tagger: "lexicon",
                lexicon,
                hyphenator: "vowel-group",
                frequencies,
            },
            corpus: config.corpus_dir.as_ref().map(|dir| CorpusInfo {
                dir: dir.to_string(),
                files: corpus::corpus_files(dir).ok().map(|files| files.len()),
            }),
            metrics: category_counts(),
        })
    }
}

fn table(path: &Utf8Path, entries: usize) -> Table {
    Table {
        path: path.to_string(),
        entries,
    }
}

/// Metrics per category, in catalogue order.
fn category_counts() -> Vec<CategoryCount> {
    let mut counts: Vec<CategoryCount> = Vec::new();
    for metric in catalogue(&MetricContext::new()) {
        match counts.last_mut() {
            Some(last) if last.category == metric.category() => last.metrics += 1,
            _ => counts.push(CategoryCount {
                category: metric.category(),
                metrics: 1,
            }),
        }
    }
    counts
}

/// Print the effective analysis setup.
#[instrument(name = "cmd_info", skip_all, fields(json_output))]
pub fn cmd_info(
    _args: InfoArgs,
    global_json: bool,
    config: &Config,
    sources: &ConfigSources,
) -> anyhow::Result<()> {
    debug!(json_output = global_json, "executing info command");
    let info = Info::gather(config, sources)?;

    if global_json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("{} {}", info.name.bold(), info.version.green());
    match &info.config_file {
        Some(path) => println!("{}: {}", "Config file".dimmed(), path.cyan()),
        None => println!("{}: {}", "Config file".dimmed(), "none loaded".yellow()),
    }

    let settings = &info.settings;
    println!();
    println!("{}", "Analysis".bold().underline());
    println!("{}: {}", "Language".dimmed(), settings.language);
    println!("{}: {}", "Tag level".dimmed(), settings.tag_level);
    println!("{}: {}", "LSA components".dimmed(), settings.n_components);
    println!("{}: {}", "Cache".dimmed(), settings.cache);
    match settings.max_input_bytes {
        Some(max) => println!("{}: {} bytes", "Input limit".dimmed(), max),
        None => println!("{}: {}", "Input limit".dimmed(), "disabled".yellow()),
    }

    let providers = &info.providers;
    println!();
    println!("{}", "Providers".bold().underline());
    println!("{}: {}", "Tokenizer".dimmed(), providers.tokenizer);
    match &providers.lexicon {
        Some(lexicon) => println!(
            "{}: {} + {} ({} entries)",
            "Tagger".dimmed(),
            providers.tagger,
            lexicon.path,
            lexicon.entries
        ),
        None => println!("{}: {}", "Tagger".dimmed(), providers.tagger),
    }
    println!("{}: {}", "Hyphenator".dimmed(), providers.hyphenator);
    match &providers.frequencies {
        Some(table) => println!(
            "{}: {} ({} entries)",
            "Frequencies".dimmed(),
            table.path,
            table.entries
        ),
        None => println!("{}: {}", "Frequencies".dimmed(), "none".dimmed()),
    }

    println!();
    println!("{}", "Corpus".bold().underline());
    match &info.corpus {
        Some(CorpusInfo {
            dir,
            files: Some(files),
        }) => println!("{dir}: {files} files"),
        Some(CorpusInfo { dir, files: None }) => {
            println!("{dir}: {}", "not readable".yellow());
        }
        None => println!("{}", "none (LSA metrics unavailable)".dimmed()),
    }

    println!();
    println!("{}", "Metrics".bold().underline());
    for count in &info.metrics {
        println!("{}: {}", count.category.to_string().dimmed(), count.metrics);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_no_tables_or_corpus() {
        let info = Info::gather(&Config::default(), &ConfigSources::default()).unwrap();
        assert!(info.config_file.is_none());
        assert_eq!(info.settings.language, "german");
        assert_eq!(info.settings.tag_level, 2);
        assert_eq!(
            info.settings.max_input_bytes,
            Some(kohaesion_core::DEFAULT_MAX_INPUT_BYTES)
        );
        assert!(info.providers.lexicon.is_none());
        assert!(info.providers.frequencies.is_none());
        assert!(info.corpus.is_none());
    }

    #[test]
    fn metrics_are_counted_per_category() {
        let counts = category_counts();
        let categories: Vec<Category> = counts.iter().map(|c| c.category).collect();
        assert_eq!(
            categories,
            vec![
                Category::Descriptive,
                Category::Referential,
                Category::Lsa,
                Category::Readability,
                Category::WordInformation,
            ]
        );
        assert_eq!(counts.iter().map(|c| c.metrics).sum::<usize>(), 45);
        assert_eq!(counts[2].metrics, 5);
    }

    #[test]
    fn tables_report_entries() {
        let dir = tempfile::tempdir().unwrap();
        let root = Utf8Path::from_path(dir.path()).unwrap();
        std::fs::write(root.join("lexicon.txt"), "Häuser Haus NN\nlief laufen VVFIN\n").unwrap();
        std::fs::write(root.join("freq.txt"), "Haus 512.3\n").unwrap();

        let config = Config {
            lexicon: Some(root.join("lexicon.txt")),
            frequencies: Some(root.join("freq.txt")),
            corpus_dir: Some(root.join("missing")),
            ..Config::default()
        };
        let info = Info::gather(&config, &ConfigSources::default()).unwrap();
        assert_eq!(info.providers.lexicon.unwrap().entries, 2);
        assert_eq!(info.providers.frequencies.unwrap().entries, 1);
        assert_eq!(info.corpus.unwrap().files, None);
    }

    #[test]
    fn unreadable_lexicon_fails() {
        let config = Config {
            lexicon: Some("/nonexistent/lexicon.txt".into()),
            ..Config::default()
        };
        let err = Info::gather(&config, &ConfigSources::default()).err().unwrap();
        assert!(err.to_string().contains("failed to read lexicon"));
    }

    #[test]
    fn cmd_info_runs_in_both_modes() {
        let config = Config::default();
        let sources = ConfigSources::default();
        assert!(cmd_info(InfoArgs::default(), false, &config, &sources).is_ok());
        assert!(cmd_info(InfoArgs::default(), true, &config, &sources).is_ok());
    }
}
