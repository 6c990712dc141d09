//! Semantic cohesion: cosine similarity of units projected into an LSA space.
//!
//! Every compared sentence or paragraph is wrapped in its own [`Document`]
//! sharing the source document's pipeline, projected once, and then compared
//! pair by pair under the usual [`Scope`] regimes.

use serde::Serialize;
use tracing::{debug, instrument};

use crate::document::Document;
use crate::error::{MetricError, MetricResult};
use crate::semantic::{SemanticSpace, cosine_similarity};

use super::{Scope, Statistic};

/// Unit of text compared by an LSA metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// Sentences as split by the pipeline.
    Sentence,
    /// Paragraphs as stored in the document.
    Paragraph,
}

impl Unit {
    const fn plural(self) -> &'static str {
        match self {
            Self::Sentence => "sentences",
            Self::Paragraph => "paragraphs",
        }
    }

    /// Metric name used in error messages.
    pub const fn metric_name(self, scope: Scope) -> &'static str {
        match (self, scope) {
            (Self::Sentence, Scope::Local) => "local LSA sentence overlap",
            (Self::Sentence, Scope::Global) => "global LSA sentence overlap",
            (Self::Paragraph, Scope::Local) => "local LSA paragraph overlap",
            (Self::Paragraph, Scope::Global) => "global LSA paragraph overlap",
        }
    }
}

/// Mean, standard deviation and number of the unit-pair cosines.
///
/// A single comparison yields its cosine with a standard deviation of 0.
///
/// # Errors
///
/// [`MetricError::InsufficientData`] when the document has fewer than two
/// units, since there is nothing to compare.
#[instrument(skip(document, space))]
pub fn lsa_overlap(
    document: &Document,
    space: &SemanticSpace,
    unit: Unit,
    scope: Scope,
) -> MetricResult<Statistic> {
    let texts: Vec<String> = match unit {
        Unit::Sentence => document.sentences()?.to_vec(),
        Unit::Paragraph => document.paragraphs().to_vec(),
    };
    if scope.pair_count(texts.len()) == 0 {
        return Err(MetricError::InsufficientData {
            metric: unit.metric_name(scope),
            unit: unit.plural(),
            required: 2,
            found: texts.len(),
        });
    }

    let vectors = texts
        .iter()
        .map(|text| space.project(&Document::from_text(text, document.pipeline().clone())))
        .collect::<MetricResult<Vec<_>>>()?;
    debug!(units = vectors.len(), "units projected");

    let cosines: Vec<f64> = scope
        .pairs(vectors.len())
        .into_iter()
        .map(|(a, b)| cosine_similarity(vectors[a].view(), vectors[b].view()))
        .collect();
    Ok(Statistic::from_values(&cosines))
}

/// Given/new LSA cohesion of sentences.
///
/// Declared for completeness; always fails with
/// [`MetricError::UnimplementedMetric`].
pub fn given_new(_document: &Document, _space: &SemanticSpace) -> MetricResult<Statistic> {
    Err(MetricError::UnimplementedMetric {
        metric: "LSA given/new",
    })
}
