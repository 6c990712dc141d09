//! Core library for kohaesion.
//!
//! Coh-Metrix style cohesion and readability metrics for German text. This
//! crate provides the document model, the NLP collaborator interfaces with
//! deterministic defaults, the metric implementations, and the configuration
//! used by the `kohaesion` CLI.
//!
//! # Modules
//!
//! - [`document`] - Documents and their cached derived views
//! - [`nlp`] - Sentence splitting, tokenization, tagging, hyphenation, frequencies
//! - [`cohesion`] - Referential and LSA overlap between sentences and paragraphs
//! - [`semantic`] - Latent semantic space fitted on a reference corpus
//! - [`descriptives`] - Paragraph, sentence and word counts and lengths
//! - [`readability`] - LIX, Wiener Sachtextformel, Flesch Reading Ease
//! - [`word_information`] - Part-of-speech incidences and word frequencies
//! - [`metric`] - The metric catalogue and report runner
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```no_run
//! use kohaesion_core::{DocumentLoader, MetricContext, analyze, catalogue};
//!
//! let document = DocumentLoader::new()
//!     .with_text("Der Hund bellt. Der Hund jagt die Katze.")
//!     .load()
//!     .expect("valid text");
//! let metrics = catalogue(&MetricContext::new());
//! let report = analyze(&document, &metrics, None).expect("analysis runs");
//! println!("{}", serde_json::to_string_pretty(&report).unwrap());
//! ```
#![deny(unsafe_code)]

pub mod cohesion;
pub mod config;
pub mod descriptives;
pub mod dictionaries;
pub mod document;
pub mod error;
pub mod language;
pub mod markdown;
pub mod metric;
pub mod nlp;
pub mod readability;
pub mod semantic;
pub mod tags;
pub mod word_information;

pub use cohesion::{OverlapRatio, Scope, Statistic};
pub use config::{Config, ConfigLoader, ConfigSources, DEFAULT_MAX_INPUT_BYTES, LogLevel};
pub use document::{Document, DocumentLoader};
pub use error::{ConfigError, ConfigResult, MetricError, MetricResult, ProviderError};
pub use language::Language;
pub use metric::{AnalysisReport, Metric, MetricContext, MetricValue, analyze, catalogue};
pub use nlp::{Pipeline, TagLevel};
pub use semantic::{SemanticSpace, SpaceConfig};
