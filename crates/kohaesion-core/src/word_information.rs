//! Word information: part-of-speech incidences and word frequencies.
//!
//! Incidences are occurrences per 1000 words, where words are tagged tokens
//! that are neither punctuation nor `XY`. Frequencies come from a
//! [`FrequencySource`]; words it does not know are left out of the mean.

use serde::Serialize;

use crate::document::Document;
use crate::error::{MetricError, MetricResult};
use crate::nlp::{FrequencySource, TagLevel, TaggedToken};
use crate::tags::{WordClass, is_word_tag};

/// Incidences are scaled to this many words.
pub const INCIDENCE_BASE: f64 = 1000.0;

/// Grammatical person of a pronoun incidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Person {
    /// ich, mich, mir, meiner.
    FirstSingular,
    /// wir, uns, unser (matched by lemma).
    FirstPlural,
    /// du, dich, dir, deiner.
    Second,
    /// er, sie, es, ihn, ihm, seiner, ihrer.
    ThirdSingular,
    /// sie, ihnen, ihrer.
    ThirdPlural,
}

impl Person {
    fn matches(self, token: &TaggedToken) -> bool {
        let surface = token.surface.as_str();
        match self {
            Self::FirstSingular => matches!(surface, "ich" | "mich" | "mir" | "meiner"),
            Self::FirstPlural => matches!(token.lemma.as_str(), "wir" | "uns" | "unser"),
            Self::Second => matches!(
                surface,
                "du" | "dich" | "dir" | "deiner" | "Du" | "Dich" | "Dir" | "Deiner"
            ),
            Self::ThirdSingular => {
                matches!(surface, "er" | "sie" | "es" | "ihn" | "ihm" | "seiner" | "ihrer")
            }
            Self::ThirdPlural => {
                matches!(surface, "sie" | "Sie" | "ihnen" | "Ihnen" | "ihrer" | "Ihrer")
            }
        }
    }
}

fn incidence(count: usize, population: usize, metric: &'static str) -> MetricResult<f64> {
    if population == 0 {
        return Err(MetricError::InsufficientData {
            metric,
            unit: "words",
            required: 1,
            found: 0,
        });
    }
    Ok(count as f64 / population as f64 * INCIDENCE_BASE)
}

fn words(document: &Document) -> MetricResult<Vec<TaggedToken>> {
    Ok(document
        .tagged_words(TagLevel::Lemma)?
        .into_iter()
        .filter(|t| is_word_tag(&t.tag))
        .collect())
}

/// Incidence of a word class per 1000 words.
#[tracing::instrument(skip(document))]
pub fn class_incidence(document: &Document, class: WordClass) -> MetricResult<f64> {
    let words = words(document)?;
    let count = words.iter().filter(|t| class.contains(&t.tag)).count();
    incidence(count, words.len(), "word class incidence")
}

/// Incidence of pronouns of one grammatical person per 1000 words.
#[tracing::instrument(skip(document))]
pub fn pronoun_incidence(document: &Document, person: Person) -> MetricResult<f64> {
    let words = words(document)?;
    let count = words
        .iter()
        .filter(|t| WordClass::Pronoun.contains(&t.tag) && person.matches(t))
        .count();
    incidence(count, words.len(), "pronoun incidence")
}

fn mean(metric: &'static str, values: &[f64]) -> MetricResult<f64> {
    if values.is_empty() {
        return Err(MetricError::InsufficientData {
            metric,
            unit: "words with known frequency",
            required: 1,
            found: 0,
        });
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Mean per-million frequency of content words.
#[tracing::instrument(skip_all)]
pub fn content_word_frequency(
    document: &Document,
    frequencies: &dyn FrequencySource,
) -> MetricResult<f64> {
    let mut values = Vec::new();
    for token in words(document)?
        .iter()
        .filter(|t| WordClass::ContentWord.contains(&t.tag))
    {
        if let Some(f) = frequencies.frequency(&token.surface)? {
            values.push(f.per_million);
        }
    }
    mean("content word frequency", &values)
}

/// Mean log frequency of all words.
#[tracing::instrument(skip_all)]
pub fn log_frequency(document: &Document, frequencies: &dyn FrequencySource) -> MetricResult<f64> {
    let mut values = Vec::new();
    for token in &words(document)? {
        if let Some(f) = frequencies.frequency(&token.surface)? {
            values.push(f.log);
        }
    }
    mean("log frequency", &values)
}

/// Mean over sentences of the lowest content-word log frequency.
///
/// Sentences without a known content word are skipped.
#[tracing::instrument(skip_all)]
pub fn minimum_log_frequency(
    document: &Document,
    frequencies: &dyn FrequencySource,
) -> MetricResult<f64> {
    let tagged = document.tagged_sentences(TagLevel::Lemma)?;
    let mut minima = Vec::new();
    for sentence in tagged.iter() {
        let mut lowest: Option<f64> = None;
        for token in sentence
            .iter()
            .filter(|t| WordClass::ContentWord.contains(&t.tag))
        {
            if let Some(f) = frequencies.frequency(&token.surface)? {
                lowest = Some(lowest.map_or(f.log, |l| l.min(f.log)));
            }
        }
        minima.extend(lowest);
    }
    mean("minimum log frequency", &minima)
}

/// Psycholinguistic norms that have no data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Norm {
    /// Age of acquisition of content words.
    AgeOfAcquisition,
    /// Familiarity of content words.
    Familiarity,
    /// Concreteness of content words.
    Concreteness,
    /// Imageability of content words.
    Imageability,
    /// Colorado meaningfulness of content words.
    Meaningfulness,
    /// Polysemy of content words.
    Polysemy,
    /// Hypernymy of nouns and verbs.
    Hypernymy,
}

impl Norm {
    /// Metric name used in error messages.
    pub const fn metric_name(self) -> &'static str {
        match self {
            Self::AgeOfAcquisition => "age of acquisition",
            Self::Familiarity => "familiarity",
            Self::Concreteness => "concreteness",
            Self::Imageability => "imageability",
            Self::Meaningfulness => "meaningfulness",
            Self::Polysemy => "polysemy",
            Self::Hypernymy => "hypernymy",
        }
    }
}

/// Rating of a psycholinguistic norm. Always [`MetricError::UnimplementedMetric`].
pub fn norm_rating(_document: &Document, norm: Norm) -> MetricResult<f64> {
    Err(MetricError::UnimplementedMetric {
        metric: norm.metric_name(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentLoader;
    use crate::nlp::FrequencyTable;

    fn doc(text: &str) -> Document {
        DocumentLoader::new().with_text(text).load().unwrap()
    }

    #[test]
    fn noun_incidence_per_thousand() {
        // Words: Der Hund jagt die Katze (punctuation excluded).
        let d = doc("Der Hund jagt die Katze.");
        let value = class_incidence(&d, WordClass::Noun).unwrap();
        assert!((value - 400.0).abs() < 1e-9);
    }

    #[test]
    fn pronoun_incidence_by_person() {
        // Six words; "Wir" is matched through its lemma.
        let d = doc("Heute sehe ich dich. Wir kommen.");
        let one = INCIDENCE_BASE / 6.0;
        assert!((pronoun_incidence(&d, Person::FirstSingular).unwrap() - one).abs() < 1e-9);
        assert!((pronoun_incidence(&d, Person::Second).unwrap() - one).abs() < 1e-9);
        assert!((pronoun_incidence(&d, Person::FirstPlural).unwrap() - one).abs() < 1e-9);
        assert_eq!(pronoun_incidence(&d, Person::ThirdPlural).unwrap(), 0.0);
    }

    #[test]
    fn empty_document_has_no_words() {
        let d = doc(" ");
        assert!(matches!(
            class_incidence(&d, WordClass::Verb),
            Err(MetricError::InsufficientData { .. })
        ));
    }

    fn table() -> FrequencyTable {
        let mut table = FrequencyTable::new();
        table.insert("Hund", 99.0);
        table.insert("Katze", 9.0);
        table.insert("der", 999.0);
        table
    }

    #[test]
    fn content_word_frequency_skips_unknown_words() {
        let d = doc("Der Hund jagt die Katze.");
        let value = content_word_frequency(&d, &table()).unwrap();
        assert!((value - 54.0).abs() < 1e-9);
    }

    #[test]
    fn log_frequency_of_all_words() {
        let d = doc("Der Hund jagt die Katze.");
        let value = log_frequency(&d, &table()).unwrap();
        assert!((value - 2.0).abs() < 1e-9);
    }

    #[test]
    fn minimum_log_frequency_per_sentence() {
        let d = doc("Der Hund jagt die Katze. Der Hund schläft. Nichts.");
        let value = minimum_log_frequency(&d, &table()).unwrap();
        assert!((value - 1.5).abs() < 1e-9);
    }

    #[test]
    fn frequency_without_known_words() {
        let d = doc("Quantenphysik.");
        assert!(content_word_frequency(&d, &FrequencyTable::new()).is_err());
    }

    #[test]
    fn norms_are_unimplemented() {
        let d = doc("Der Hund bellt.");
        let err = norm_rating(&d, Norm::Concreteness).unwrap_err();
        assert_eq!(err.to_string(), "concreteness is not implemented");
    }
}
