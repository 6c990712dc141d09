//! Logging setup: human-readable logs on stderr, optional JSONL log file.
//!
//! The log file location is resolved from, in order:
//! 1. `KOHAESION_LOG_PATH` (exact file)
//! 2. `KOHAESION_LOG_DIR` (directory, file named `kohaesion.jsonl`)
//! 3. `log_dir` from the configuration
//!
//! Without any of them only stderr logging is installed.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

/// Explicit log file path.
pub const LOG_PATH_ENV: &str = "KOHAESION_LOG_PATH";
/// Log directory.
pub const LOG_DIR_ENV: &str = "KOHAESION_LOG_DIR";

const LOG_FILE_NAME: &str = "kohaesion.jsonl";

/// Where logs go.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// JSONL log file, if any.
    pub log_file: Option<PathBuf>,
}

impl ObservabilityConfig {
    /// Resolve the log file from the environment, falling back to the
    /// configured directory.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        Self::resolve(
            std::env::var_os(LOG_PATH_ENV).map(PathBuf::from),
            std::env::var_os(LOG_DIR_ENV).map(PathBuf::from),
            config_log_dir,
        )
    }

    fn resolve(
        log_path: Option<PathBuf>,
        env_dir: Option<PathBuf>,
        config_dir: Option<PathBuf>,
    ) -> Self {
        let log_file = log_path.or_else(|| env_dir.or(config_dir).map(|d| d.join(LOG_FILE_NAME)));
        Self { log_file }
    }
}

/// Filter for the log file and the overall subscriber.
///
/// `RUST_LOG` wins when set. Otherwise `--quiet` means errors only, each
/// `-v` raises the level, and the configured level is the default.
pub fn env_filter(quiet: bool, verbose: u8, config_level: &str) -> EnvFilter {
    if std::env::var_os(EnvFilter::DEFAULT_ENV).is_some()
        && let Ok(filter) = EnvFilter::try_from_default_env()
    {
        return filter;
    }
    EnvFilter::new(level_directive(quiet, verbose, config_level))
}

fn level_directive(quiet: bool, verbose: u8, config_level: &str) -> &str {
    match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => config_level,
        (false, 1) => "debug",
        (false, _) => "trace",
    }
}

/// Level shown on stderr. Warnings by default so command output stays clean.
const fn stderr_level(quiet: bool, verbose: u8) -> LevelFilter {
    match (quiet, verbose) {
        (true, _) => LevelFilter::ERROR,
        (false, 0) => LevelFilter::WARN,
        (false, 1) => LevelFilter::DEBUG,
        (false, _) => LevelFilter::TRACE,
    }
}

fn split_log_path(path: &Path) -> anyhow::Result<(PathBuf, PathBuf)> {
    let file_name = path
        .file_name()
        .with_context(|| format!("log path has no file name: {}", path.display()))?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    Ok((dir.to_path_buf(), PathBuf::from(file_name)))
}

/// Install the global subscriber.
///
/// Returns the guard that flushes the log file; keep it alive until exit.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
    quiet: bool,
    verbose: u8,
) -> anyhow::Result<Option<WorkerGuard>> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(stderr_level(quiet, verbose));

    let (file_layer, guard) = match &config.log_file {
        Some(path) => {
            let (dir, file_name) = split_log_path(path)?;
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::never(&dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().json().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("a global tracing subscriber is already installed")?;
    Ok(guard)
}
