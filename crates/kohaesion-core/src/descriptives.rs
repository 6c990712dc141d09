//! Descriptive indices: paragraph, sentence and word counts and lengths.
//!
//! Words are tagged tokens that are neither punctuation nor `XY`.

use serde::Serialize;

use crate::cohesion::Statistic;
use crate::document::Document;
use crate::error::{MetricError, MetricResult};
use crate::nlp::{TagLevel, TaggedToken};
use crate::tags::is_word_tag;

/// Mean and sample standard deviation of per-unit lengths, with the grand
/// total they were taken from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Distribution {
    /// Mean length.
    pub mean: f64,
    /// Sample standard deviation; 0 for fewer than two units.
    pub stdev: f64,
    /// Sum of all lengths.
    pub total: usize,
}

impl Distribution {
    fn from_lengths(
        metric: &'static str,
        unit: &'static str,
        lengths: &[usize],
    ) -> MetricResult<Self> {
        if lengths.is_empty() {
            return Err(MetricError::InsufficientData {
                metric,
                unit,
                required: 1,
                found: 0,
            });
        }
        let Statistic { mean, stdev, .. } = Statistic::from_counts(lengths);
        Ok(Self {
            mean,
            stdev,
            total: lengths.iter().sum(),
        })
    }
}

fn words_of(sentence: &[TaggedToken]) -> impl Iterator<Item = &TaggedToken> {
    sentence.iter().filter(|t| is_word_tag(&t.tag))
}

/// DESPC: number of paragraphs.
pub fn paragraph_count(document: &Document) -> usize {
    document.paragraphs().len()
}

/// DESSC: number of sentences.
pub fn sentence_count(document: &Document) -> MetricResult<usize> {
    Ok(document.sentences()?.len())
}

/// DESWC: number of words.
pub fn word_count(document: &Document) -> MetricResult<usize> {
    let tagged = document.tagged_sentences(TagLevel::Lemma)?;
    Ok(tagged.iter().map(|s| words_of(s).count()).sum())
}

/// DESPL: sentences per paragraph.
#[tracing::instrument(skip_all)]
pub fn paragraph_length(document: &Document) -> MetricResult<Distribution> {
    let splitter = document.pipeline().splitter();
    let lengths = document
        .paragraphs()
        .iter()
        .map(|p| Ok(splitter.split_sentences(p, document.language())?.len()))
        .collect::<MetricResult<Vec<_>>>()?;
    Distribution::from_lengths("paragraph length", "paragraphs", &lengths)
}

/// DESSL: words per sentence.
#[tracing::instrument(skip_all)]
pub fn sentence_length(document: &Document) -> MetricResult<Distribution> {
    let tagged = document.tagged_sentences(TagLevel::Lemma)?;
    let lengths: Vec<usize> = tagged.iter().map(|s| words_of(s).count()).collect();
    Distribution::from_lengths("sentence length", "sentences", &lengths)
}

/// DESWLsy: syllables per word.
#[tracing::instrument(skip_all)]
pub fn word_length_syllables(document: &Document) -> MetricResult<Distribution> {
    let tagged = document.tagged_sentences(TagLevel::Lemma)?;
    let hyphenator = document.pipeline().hyphenator();
    let lengths = tagged
        .iter()
        .flat_map(|s| words_of(s))
        .map(|t| Ok(hyphenator.syllables(&t.surface, document.language())?))
        .collect::<MetricResult<Vec<_>>>()?;
    Distribution::from_lengths("word length in syllables", "words", &lengths)
}

/// DESWLlt: characters per word.
pub fn word_length_characters(document: &Document) -> MetricResult<Distribution> {
    let tagged = document.tagged_sentences(TagLevel::Lemma)?;
    let lengths: Vec<usize> = tagged
        .iter()
        .flat_map(|s| words_of(s))
        .map(|t| t.surface.chars().count())
        .collect();
    Distribution::from_lengths("word length in characters", "words", &lengths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentLoader;

    fn doc(text: &str) -> Document {
        DocumentLoader::new().with_text(text).load().unwrap()
    }

    #[test]
    fn counts() {
        let d = doc("Der Hund bellt. Die Katze schläft.\nDer Garten blüht.");
        assert_eq!(paragraph_count(&d), 2);
        assert_eq!(sentence_count(&d).unwrap(), 3);
        assert_eq!(word_count(&d).unwrap(), 9);
    }

    #[test]
    fn paragraph_length_counts_sentences() {
        let d = doc("Der Hund bellt. Die Katze schläft.\nDer Garten blüht.");
        let l = paragraph_length(&d).unwrap();
        assert!((l.mean - 1.5).abs() < 1e-12);
        assert!((l.stdev - 0.5f64.sqrt()).abs() < 1e-12);
        assert_eq!(l.total, 3);
    }

    #[test]
    fn sentence_length_skips_punctuation() {
        let d = doc("Der Hund bellt laut. Ja.");
        let l = sentence_length(&d).unwrap();
        assert!((l.mean - 2.5).abs() < 1e-12);
        assert_eq!(l.total, 5);
    }

    #[test]
    fn word_length_in_characters() {
        let d = doc("Ich bin hier.");
        let l = word_length_characters(&d).unwrap();
        assert!((l.mean - 10.0 / 3.0).abs() < 1e-12);
        assert_eq!(l.total, 10);
    }

    #[test]
    fn word_length_in_syllables() {
        let d = doc("Der Garten.");
        let l = word_length_syllables(&d).unwrap();
        assert_eq!(l.total, 3);
        assert!((l.mean - 1.5).abs() < 1e-12);
    }

    #[test]
    fn single_sentence_has_zero_stdev() {
        let l = sentence_length(&doc("Der Hund bellt.")).unwrap();
        assert_eq!(l.stdev, 0.0);
    }

    #[test]
    fn empty_document() {
        let d = doc("  ");
        assert_eq!(paragraph_count(&d), 0);
        assert_eq!(word_count(&d).unwrap(), 0);
        assert!(matches!(
            paragraph_length(&d),
            Err(MetricError::InsufficientData { unit: "paragraphs", .. })
        ));
        assert!(sentence_length(&d).is_err());
        assert!(word_length_characters(&d).is_err());
    }
}
