//! Word frequency lookup.
//!
//! Frequency metrics consult a [`FrequencySource`]. The bundled
//! [`FrequencyTable`] reads a whitespace-separated file with one entry per line:
//!
//! ```text
//! # word    per_million    log_frequency (optional)
//! Haus      512.3          2.71
//! laufen    88.0
//! ```
//!
//! When the log column is missing, `log10(per_million + 1)` is used.

use std::collections::HashMap;

use camino::Utf8Path;

use crate::error::ProviderError;

/// Frequency figures for a single word.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WordFrequency {
    /// Occurrences per million corpus tokens.
    pub per_million: f64,
    /// Logarithmic frequency.
    pub log: f64,
}

/// Lexical frequency lookup service.
pub trait FrequencySource: Send + Sync {
    /// Look up a word; `Ok(None)` when the word is unknown.
    fn frequency(&self, word: &str) -> Result<Option<WordFrequency>, ProviderError>;
}

/// In-memory frequency table.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    entries: HashMap<String, WordFrequency>,
}

impl FrequencyTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an entry.
    pub fn insert(&mut self, word: impl Into<String>, per_million: f64) {
        let log = (per_million + 1.0).log10();
        self.entries
            .insert(word.into(), WordFrequency { per_million, log });
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load a table from a whitespace-separated file.
    #[tracing::instrument(skip_all, fields(path = %path))]
    pub fn from_file(path: &Utf8Path) -> Result<Self, ProviderError> {
        let content =
            std::fs::read_to_string(path.as_std_path()).map_err(|source| ProviderError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        let table = Self::parse(&content, path)?;
        tracing::debug!(entries = table.len(), "frequency table loaded");
        Ok(table)
    }

    fn parse(content: &str, path: &Utf8Path) -> Result<Self, ProviderError> {
        let mut entries = HashMap::new();
        for (idx, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let malformed = |reason: &str| ProviderError::Malformed {
                path: path.to_path_buf(),
                line: idx + 1,
                reason: reason.to_string(),
            };
            let mut fields = line.split_whitespace();
            let word = fields.next().filter(|w| !w.is_empty());
            let per_million = fields.next().map(str::parse::<f64>);
            let (Some(word), Some(Ok(per_million))) = (word, per_million) else {
                return Err(malformed("expected `word<TAB>per_million`"));
            };
            let log = match fields.next() {
                Some(raw) => raw
                    .parse::<f64>()
                    .map_err(|_| malformed("log frequency is not a number"))?,
                None => (per_million + 1.0).log10(),
            };
            entries.insert(word.to_string(), WordFrequency { per_million, log });
        }
        Ok(Self { entries })
    }
}

impl FrequencySource for FrequencyTable {
    fn frequency(&self, word: &str) -> Result<Option<WordFrequency>, ProviderError> {
        Ok(self
            .entries
            .get(word)
            .or_else(|| self.entries.get(&word.to_lowercase()))
            .copied())
    }
}
