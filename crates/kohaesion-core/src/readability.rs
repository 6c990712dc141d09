//! Readability formulas for German text.
//!
//! - LIX: `ASL + 100 · (long words / words)`
//! - Wiener Sachtextformel (first variant):
//!   `0.1935·MS + 0.1672·SL + 0.1297·IW − 0.0327·ES − 0.875`
//! - Flesch Reading Ease (German, Amstad): `206.835 − 1.015·ASL − 84.6·ASW`
//!
//! A word is any tagged token that is neither punctuation nor `XY`; long words
//! have more than six characters; syllables are hyphenation points plus one.
//! LIX and the Wiener Sachtextformel are defined for German only. Flesch also
//! carries the original English coefficients.

use serde::Serialize;

use crate::document::Document;
use crate::error::{MetricError, MetricResult};
use crate::language::Language;
use crate::nlp::TagLevel;
use crate::tags::is_word_tag;

/// Words longer than this many characters count as long.
pub const LONG_WORD_CHARS: usize = 6;

/// Word, sentence and syllable counts the formulas are computed from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TextCounts {
    /// Number of sentences.
    pub sentences: usize,
    /// Number of words.
    pub words: usize,
    /// Words with more than six characters.
    pub long_words: usize,
    /// Total syllables.
    pub syllables: usize,
    /// Words with exactly one syllable.
    pub monosyllabic: usize,
    /// Words with three or more syllables.
    pub polysyllabic: usize,
}

impl TextCounts {
    /// Count the words of `document`, hyphenating each one.
    #[tracing::instrument(skip_all)]
    pub fn from_document(document: &Document) -> MetricResult<Self> {
        let tagged = document.tagged_sentences(TagLevel::Lemma)?;
        let hyphenator = document.pipeline().hyphenator();
        let language = document.language();

        let mut counts = Self {
            sentences: tagged.len(),
            ..Self::default()
        };
        for token in tagged.iter().flatten().filter(|t| is_word_tag(&t.tag)) {
            counts.words += 1;
            if token.surface.chars().count() > LONG_WORD_CHARS {
                counts.long_words += 1;
            }
            let syllables = hyphenator.syllables(&token.surface, language)?;
            counts.syllables += syllables;
            match syllables {
                1 => counts.monosyllabic += 1,
                3.. => counts.polysyllabic += 1,
                _ => {}
            }
        }
        tracing::debug!(?counts, "readability counts");
        Ok(counts)
    }

    /// Average sentence length in words.
    pub fn words_per_sentence(&self) -> f64 {
        self.words as f64 / self.sentences as f64
    }

    /// Average syllables per word.
    pub fn syllables_per_word(&self) -> f64 {
        self.syllables as f64 / self.words as f64
    }

    fn percent(&self, count: usize) -> f64 {
        100.0 * count as f64 / self.words as f64
    }

    fn require(&self, metric: &'static str) -> MetricResult<()> {
        if self.sentences == 0 {
            return Err(MetricError::too_few_sentences(metric, 1, 0));
        }
        if self.words == 0 {
            return Err(MetricError::InsufficientData {
                metric,
                unit: "words",
                required: 1,
                found: 0,
            });
        }
        Ok(())
    }
}

fn german_only(metric: &'static str, language: &Language) -> MetricResult<()> {
    match language {
        Language::German => Ok(()),
        other => Err(MetricError::UnsupportedLanguage {
            metric,
            language: other.to_string(),
        }),
    }
}

/// LIX from precomputed counts.
pub fn lix_from_counts(counts: &TextCounts, language: &Language) -> MetricResult<f64> {
    const METRIC: &str = "LIX";
    german_only(METRIC, language)?;
    counts.require(METRIC)?;
    Ok(counts.words_per_sentence() + counts.percent(counts.long_words))
}

/// Wiener Sachtextformel from precomputed counts.
pub fn wiener_from_counts(counts: &TextCounts, language: &Language) -> MetricResult<f64> {
    const METRIC: &str = "Wiener Sachtextformel";
    german_only(METRIC, language)?;
    counts.require(METRIC)?;
    let ms = counts.percent(counts.polysyllabic);
    let sl = counts.words_per_sentence();
    let iw = counts.percent(counts.long_words);
    let es = counts.percent(counts.monosyllabic);
    Ok(0.1935 * ms + 0.1672 * sl + 0.1297 * iw - 0.0327 * es - 0.875)
}

/// Flesch Reading Ease from precomputed counts.
pub fn flesch_from_counts(counts: &TextCounts, language: &Language) -> MetricResult<f64> {
    const METRIC: &str = "Flesch Reading Ease";
    let (base, sentence_weight, syllable_weight) = match language {
        Language::German => (206.835, 1.015, 84.6),
        Language::English => (164.835, 1.0, 58.5),
        Language::Other(name) => {
            return Err(MetricError::UnsupportedLanguage {
                metric: METRIC,
                language: name.clone(),
            });
        }
    };
    counts.require(METRIC)?;
    Ok(base
        - sentence_weight * counts.words_per_sentence()
        - syllable_weight * counts.syllables_per_word())
}

/// LIX readability index (Björnsson).
pub fn lix(document: &Document) -> MetricResult<f64> {
    german_only("LIX", document.language())?;
    lix_from_counts(&TextCounts::from_document(document)?, document.language())
}

/// Wiener Sachtextformel (school grade 4 to 15).
pub fn wiener_sachtextformel(document: &Document) -> MetricResult<f64> {
    german_only("Wiener Sachtextformel", document.language())?;
    wiener_from_counts(&TextCounts::from_document(document)?, document.language())
}

/// Flesch Reading Ease; higher is easier.
pub fn flesch_reading_ease(document: &Document) -> MetricResult<f64> {
    if let Language::Other(name) = document.language() {
        return Err(MetricError::UnsupportedLanguage {
            metric: "Flesch Reading Ease",
            language: name.clone(),
        });
    }
    flesch_from_counts(&TextCounts::from_document(document)?, document.language())
}

/// All readability scores of a document.
#[derive(Debug, Clone, Serialize)]
pub struct ReadabilityReport {
    /// Underlying counts.
    pub counts: TextCounts,
    /// LIX, absent for languages other than German.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lix: Option<f64>,
    /// Wiener Sachtextformel, absent for languages other than German.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wiener_sachtextformel: Option<f64>,
    /// Flesch Reading Ease.
    pub flesch_reading_ease: f64,
}

/// Count once and evaluate every formula that supports the document
/// language.
///
/// # Errors
///
/// [`MetricError::UnsupportedLanguage`] when no formula supports the
/// language; [`MetricError::InsufficientData`] for a document without words.
#[tracing::instrument(skip_all)]
pub fn check_readability(document: &Document) -> MetricResult<ReadabilityReport> {
    let language = document.language();
    if let Language::Other(name) = language {
        return Err(MetricError::UnsupportedLanguage {
            metric: "readability",
            language: name.clone(),
        });
    }
    let counts = TextCounts::from_document(document)?;
    let flesch_reading_ease = flesch_from_counts(&counts, language)?;
    Ok(ReadabilityReport {
        lix: lix_from_counts(&counts, language).ok(),
        wiener_sachtextformel: wiener_from_counts(&counts, language).ok(),
        flesch_reading_ease,
        counts,
    })
}
