//! Latent semantic space fitted on a reference corpus.
//!
//! Building a [`SemanticSpace`] lemmatizes every paragraph of the corpus
//! documents on its own, counts terms into a paragraph-term matrix, applies smoothed tf-idf weighting with
//! L2 row normalization, and fits a truncated SVD. The vocabulary, the idf
//! weights and the components are frozen afterwards: [`SemanticSpace::project`]
//! maps any document into the fitted space, silently dropping terms the
//! corpus never contained.
//!
//! A space only exists once its build has finished, so there is no way to
//! project against a half-fitted basis.

pub mod corpus;
pub mod svd;
pub mod vectorizer;

use std::sync::atomic::AtomicBool;

use ndarray::{Array1, Array2, ArrayView1};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::document::Document;
use crate::error::{MetricError, MetricResult};

use svd::TruncatedSvd;
use vectorizer::{TfIdf, Vocabulary, l2_normalize};

/// Default number of latent dimensions.
pub const DEFAULT_COMPONENTS: usize = 4;

/// Settings for building a semantic space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceConfig {
    /// Number of latent dimensions. Must be at least 1 and smaller than the
    /// corpus vocabulary.
    pub n_components: usize,
}

impl Default for SpaceConfig {
    fn default() -> Self {
        Self {
            n_components: DEFAULT_COMPONENTS,
        }
    }
}

/// A term weighted in one latent dimension.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightedTerm {
    /// Vocabulary term.
    pub term: String,
    /// Loading of the term in the dimension.
    pub weight: f64,
}

/// A frozen LSA basis.
#[derive(Debug, Clone)]
pub struct SemanticSpace {
    vocabulary: Vocabulary,
    tfidf: TfIdf,
    svd: TruncatedSvd,
    documents: usize,
    paragraphs: Array2<f64>,
}

impl SemanticSpace {
    /// Fit a space on `corpus`.
    pub fn build(corpus: &[Document], config: &SpaceConfig) -> MetricResult<Self> {
        Self::build_cancellable(corpus, config, &AtomicBool::new(false))
    }

    /// Fit a space on `corpus`, giving up with [`MetricError::Cancelled`]
    /// once `cancel` is set.
    ///
    /// # Errors
    ///
    /// [`MetricError::InvalidInput`] for an empty corpus or an unusable
    /// component count; collaborator failures while lemmatizing.
    #[instrument(skip_all, fields(documents = corpus.len(), n_components = config.n_components))]
    pub fn build_cancellable(
        corpus: &[Document],
        config: &SpaceConfig,
        cancel: &AtomicBool,
    ) -> MetricResult<Self> {
        if corpus.is_empty() {
            return Err(MetricError::InvalidInput(
                "reference corpus is empty".to_string(),
            ));
        }

        let mut rows = Vec::new();
        for document in corpus {
            if cancel.load(std::sync::atomic::Ordering::Relaxed) {
                return Err(MetricError::Cancelled);
            }
            for paragraph in document.paragraphs() {
                let unit = Document::from_text(paragraph, document.pipeline().clone());
                rows.push(unit.lemmatized_text()?);
            }
        }
        debug!(paragraphs = rows.len(), "corpus lemmatized");

        let vocabulary = Vocabulary::fit(&rows);
        let k = config.n_components;
        if k == 0 || k >= vocabulary.len() {
            return Err(MetricError::InvalidInput(format!(
                "n_components must be between 1 and {}, got {k}",
                vocabulary.len().saturating_sub(1)
            )));
        }

        let counts = vocabulary.count_matrix(&rows);
        let tfidf = TfIdf::fit(&counts);
        let weighted = tfidf.transform_matrix(&counts);
        debug!(terms = vocabulary.len(), "tf-idf matrix built");

        let svd = TruncatedSvd::fit(&weighted, k, cancel)?;

        let mut paragraphs = weighted.dot(&svd.components.t());
        for mut row in paragraphs.rows_mut() {
            let normalized = l2_normalize(row.to_owned());
            row.assign(&normalized);
        }

        info!(
            documents = corpus.len(),
            paragraphs = rows.len(),
            terms = vocabulary.len(),
            iterations = svd.iterations,
            "semantic space built"
        );
        Ok(Self {
            vocabulary,
            tfidf,
            svd,
            documents: corpus.len(),
            paragraphs,
        })
    }

    /// Number of latent dimensions.
    pub fn n_components(&self) -> usize {
        self.svd.components.nrows()
    }

    /// Fitted vocabulary in column order.
    pub fn vocabulary(&self) -> &[String] {
        self.vocabulary.terms()
    }

    /// Singular values of the fitted components, descending.
    pub const fn singular_values(&self) -> &Array1<f64> {
        &self.svd.singular_values
    }

    /// Number of latent dimensions that carry variance. Lower than
    /// [`Self::n_components`] when the corpus matrix has lower rank; the
    /// corpus projects to zero on the remaining dimensions.
    pub const fn rank(&self) -> usize {
        self.svd.rank
    }

    /// Number of corpus documents the space was fitted on.
    pub const fn n_documents(&self) -> usize {
        self.documents
    }

    /// Unit-length reduced vectors of the reference corpus, one row per
    /// corpus paragraph in corpus order.
    pub const fn paragraph_vectors(&self) -> &Array2<f64> {
        &self.paragraphs
    }

    /// Project a document into the space.
    #[instrument(level = "debug", skip_all)]
    pub fn project(&self, document: &Document) -> MetricResult<Array1<f64>> {
        Ok(self.project_lemmas(&document.lemmatized_text()?))
    }

    /// Project space-separated lemmas into the space.
    pub fn project_lemmas(&self, lemmas: &str) -> Array1<f64> {
        let counts = self.vocabulary.count(lemmas);
        let weighted = self.tfidf.transform(counts.view());
        l2_normalize(self.svd.components.dot(&weighted))
    }

    /// Cosine similarity of two documents in the space.
    pub fn cosine(&self, a: &Document, b: &Document) -> MetricResult<f64> {
        let x = self.project(a)?;
        let y = self.project(b)?;
        Ok(cosine_similarity(x.view(), y.view()))
    }

    /// The `n` most heavily loaded terms of a dimension, heaviest first.
    pub fn top_terms(&self, dimension: usize, n: usize) -> MetricResult<Vec<WeightedTerm>> {
        if dimension >= self.n_components() {
            return Err(MetricError::InvalidInput(format!(
                "dimension {dimension} out of range (space has {})",
                self.n_components()
            )));
        }
        let loadings = self.svd.components.row(dimension);
        let mut order: Vec<usize> = (0..loadings.len()).collect();
        order.sort_by(|&i, &j| loadings[j].total_cmp(&loadings[i]).then(i.cmp(&j)));
        Ok(order
            .into_iter()
            .take(n)
            .filter_map(|i| {
                self.vocabulary.term(i).map(|term| WeightedTerm {
                    term: term.to_string(),
                    weight: loadings[i],
                })
            })
            .collect())
    }
}

/// Cosine of the angle between two vectors; 0 if either is the zero vector.
pub fn cosine_similarity(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    let norms = a.dot(&a).sqrt() * b.dot(&b).sqrt();
    if norms == 0.0 {
        return 0.0;
    }
    (a.dot(&b) / norms).clamp(-1.0, 1.0)
}
