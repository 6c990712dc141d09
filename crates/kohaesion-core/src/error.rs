//! Error types for kohaesion-core.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Configuration file not found after searching all locations.
    #[error("no configuration file found")]
    NotFound,
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Failures reported by the external collaborators (tokenizer, tagger,
/// hyphenator, frequency lookup).
#[derive(Error, Debug)]
pub enum ProviderError {
    /// A lexicon or frequency file could not be read.
    #[error("failed to read {path}")]
    Read {
        /// The file that failed to load.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A line in a lexicon or frequency file is malformed.
    #[error("{path}:{line}: {reason}")]
    Malformed {
        /// The file containing the bad line.
        path: Utf8PathBuf,
        /// One-based line number.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// The provider does not support the requested language.
    #[error("{provider} does not support language {language}")]
    Language {
        /// Name of the provider.
        provider: &'static str,
        /// The language that was requested.
        language: String,
    },

    /// The provider returned a result that breaks its contract.
    #[error("{provider} returned {got} tokens for a sentence of {expected} words")]
    Contract {
        /// Name of the provider.
        provider: &'static str,
        /// Number of input words.
        expected: usize,
        /// Number of tagged tokens returned.
        got: usize,
    },
}

/// Errors raised while building documents or computing metrics.
#[derive(Error, Debug)]
pub enum MetricError {
    /// Neither a file nor any text was supplied.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Too few sentences, paragraphs or comparisons for the metric.
    #[error("{metric} requires at least {required} {unit}, got {found}")]
    InsufficientData {
        /// Human-readable metric name.
        metric: &'static str,
        /// What is being counted (sentences, paragraphs, words, ...).
        unit: &'static str,
        /// Minimum count the metric needs.
        required: usize,
        /// Count actually present.
        found: usize,
    },

    /// The metric has no coefficients for the document language.
    #[error("{metric} is not defined for language {language}")]
    UnsupportedLanguage {
        /// Human-readable metric name.
        metric: &'static str,
        /// The configured language.
        language: String,
    },

    /// A collaborator the metric depends on has not been set up.
    #[error("precondition violated: {0}")]
    PreconditionViolation(String),

    /// The metric is declared but has no implementation yet.
    #[error("{metric} is not implemented")]
    UnimplementedMetric {
        /// Human-readable metric name.
        metric: &'static str,
    },

    /// A semantic space build was cancelled before it completed.
    #[error("semantic space build cancelled")]
    Cancelled,

    /// Reading a document from disk failed.
    #[error("failed to read {path}")]
    Io {
        /// The file that failed to load.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// An external collaborator failed.
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl MetricError {
    /// Short machine-readable name of the failure kind.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::InsufficientData { .. } => "insufficient_data",
            Self::UnsupportedLanguage { .. } => "unsupported_language",
            Self::PreconditionViolation(_) => "precondition_violation",
            Self::UnimplementedMetric { .. } => "unimplemented_metric",
            Self::Cancelled => "cancelled",
            Self::Io { .. } => "io",
            Self::Provider(_) => "provider",
        }
    }

    /// Shorthand for [`MetricError::InsufficientData`] counted in sentences.
    pub const fn too_few_sentences(metric: &'static str, required: usize, found: usize) -> Self {
        Self::InsufficientData {
            metric,
            unit: "sentences",
            required,
            found,
        }
    }
}

/// Result type alias using [`MetricError`].
pub type MetricResult<T> = Result<T, MetricError>;
