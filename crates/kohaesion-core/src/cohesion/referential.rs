//! Referential cohesion: word overlap between sentences.
//!
//! Each sentence is reduced to a set of word forms drawn from one word
//! class, and the sets are compared pairwise:
//!
//! | Overlap       | Word forms compared                                 | Tag level |
//! |---------------|-----------------------------------------------------|-----------|
//! | noun          | noun surfaces                                       | 1         |
//! | argument      | argument-pronoun surfaces ∪ noun lemmas             | 1         |
//! | stem          | argument-pronoun surfaces ∪ noun stems              | 2         |
//! | content word  | content-word surfaces                               | 1         |
//!
//! The first three count a pair as overlapping when the sets intersect and
//! return an [`OverlapRatio`]. Content-word overlap measures each pair by
//! |A ∩ B| / |A ∪ B| (0 when both sets are empty) and returns a
//! [`Statistic`] over the pairs.

use std::collections::HashSet;

use serde::Serialize;

use crate::document::Document;
use crate::error::MetricResult;
use crate::nlp::{TagLevel, TaggedToken};
use crate::tags::WordClass;

use super::{OverlapRatio, Scope, Statistic};

/// The word forms a referential overlap metric compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Overlap {
    /// Noun surfaces, sensitive to inflection.
    Noun,
    /// Argument pronouns and noun lemmas.
    Argument,
    /// Argument pronouns and noun stems.
    Stem,
    /// Content-word surfaces, compared proportionally.
    ContentWord,
}

impl Overlap {
    /// Tag level the sentences are tagged at.
    pub const fn tag_level(self) -> TagLevel {
        match self {
            Self::Stem => TagLevel::Stem,
            Self::Noun | Self::Argument | Self::ContentWord => TagLevel::Lemma,
        }
    }

    /// Metric name used in error messages.
    pub const fn metric_name(self, scope: Scope) -> &'static str {
        match (self, scope) {
            (Self::Noun, Scope::Local) => "local noun overlap",
            (Self::Noun, Scope::Global) => "global noun overlap",
            (Self::Argument, Scope::Local) => "local argument overlap",
            (Self::Argument, Scope::Global) => "global argument overlap",
            (Self::Stem, Scope::Local) => "local stem overlap",
            (Self::Stem, Scope::Global) => "global stem overlap",
            (Self::ContentWord, Scope::Local) => "local content word overlap",
            (Self::ContentWord, Scope::Global) => "global content word overlap",
        }
    }

    /// The set of word forms of one sentence this overlap compares.
    pub fn word_forms(self, sentence: &[TaggedToken]) -> HashSet<&str> {
        let pronouns = || {
            sentence
                .iter()
                .filter(|t| WordClass::ArgumentPronoun.contains(&t.tag))
                .map(|t| t.surface.as_str())
        };
        let nouns = || {
            sentence
                .iter()
                .filter(|t| WordClass::Noun.contains(&t.tag))
        };
        match self {
            Self::Noun => nouns().map(|t| t.surface.as_str()).collect(),
            Self::Argument => pronouns().chain(nouns().map(|t| t.lemma.as_str())).collect(),
            Self::Stem => pronouns().chain(nouns().map(TaggedToken::normalized)).collect(),
            Self::ContentWord => sentence
                .iter()
                .filter(|t| WordClass::ContentWord.contains(&t.tag))
                .map(|t| t.surface.as_str())
                .collect(),
        }
    }
}

/// Tag `document` at the overlap's level and reduce each sentence to its
/// word-form set, after checking there are enough sentences for `scope`.
fn sentence_sets<'a>(
    document: &Document,
    overlap: Overlap,
    scope: Scope,
    level: TagLevel,
    tagged: &'a [Vec<TaggedToken>],
) -> MetricResult<Vec<HashSet<&'a str>>> {
    scope.require(overlap.metric_name(scope), "sentences", tagged.len())?;
    tracing::debug!(
        sentences = tagged.len(),
        %level,
        language = %document.language(),
        "comparing sentence word sets"
    );
    Ok(tagged.iter().map(|s| overlap.word_forms(s)).collect())
}

/// Share of sentence pairs whose word-form sets intersect.
///
/// `overlap` must not be [`Overlap::ContentWord`], which is measured
/// proportionally by [`content_word_overlap`]; passing it here counts
/// content-word intersections as binary overlap.
pub fn binary_overlap(
    document: &Document,
    overlap: Overlap,
    scope: Scope,
) -> MetricResult<OverlapRatio> {
    binary_overlap_at(document, overlap, scope, overlap.tag_level())
}

/// [`binary_overlap`] with the sentences tagged at `level` instead of the
/// overlap's default level.
///
/// Only stem overlap reads a level-dependent field; tagged below
/// [`TagLevel::Stem`] it falls back to lemmas.
#[tracing::instrument(skip(document))]
pub fn binary_overlap_at(
    document: &Document,
    overlap: Overlap,
    scope: Scope,
    level: TagLevel,
) -> MetricResult<OverlapRatio> {
    let tagged = document.tagged_sentences(level)?;
    let sets = sentence_sets(document, overlap, scope, level, &tagged)?;

    let mut result = OverlapRatio {
        overlapping: 0,
        compared: 0,
    };
    for (a, b) in scope.pairs(sets.len()) {
        result.compared += 1;
        if !sets[a].is_disjoint(&sets[b]) {
            result.overlapping += 1;
        }
    }
    Ok(result)
}

/// Noun overlap: exact noun surfaces.
pub fn noun_overlap(document: &Document, scope: Scope) -> MetricResult<OverlapRatio> {
    binary_overlap(document, Overlap::Noun, scope)
}

/// Argument overlap: argument pronouns and noun lemmas.
pub fn argument_overlap(document: &Document, scope: Scope) -> MetricResult<OverlapRatio> {
    binary_overlap(document, Overlap::Argument, scope)
}

/// Stem overlap: argument pronouns and noun stems.
pub fn stem_overlap(document: &Document, scope: Scope) -> MetricResult<OverlapRatio> {
    binary_overlap(document, Overlap::Stem, scope)
}

/// Proportional content-word overlap.
#[tracing::instrument(skip(document))]
pub fn content_word_overlap(document: &Document, scope: Scope) -> MetricResult<Statistic> {
    let overlap = Overlap::ContentWord;
    let level = overlap.tag_level();
    let tagged = document.tagged_sentences(level)?;
    let sets = sentence_sets(document, overlap, scope, level, &tagged)?;

    let proportions: Vec<f64> = scope
        .pairs(sets.len())
        .into_iter()
        .map(|(a, b)| jaccard(&sets[a], &sets[b]))
        .collect();
    Ok(Statistic::from_values(&proportions))
}

/// |A ∩ B| / |A ∪ B|, or 0 when both sets are empty.
pub fn jaccard(a: &HashSet<&str>, b: &HashSet<&str>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}
