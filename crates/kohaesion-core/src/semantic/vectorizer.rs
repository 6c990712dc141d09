//! Term counting and tf-idf weighting against a frozen vocabulary.

use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;

use ndarray::{Array1, Array2, ArrayView1};
use regex::Regex;

/// Tokens of two or more word characters.
static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("valid regex"));

/// Lowercase `text` and split it into vocabulary tokens.
pub fn terms(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    TOKEN_PATTERN
        .find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Sorted term list with a reverse index.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    terms: Vec<String>,
    index: HashMap<String, usize>,
}

impl Vocabulary {
    /// Collect every term of `rows`, sorted alphabetically.
    pub fn fit<S: AsRef<str>>(rows: &[S]) -> Self {
        let unique: BTreeSet<String> = rows.iter().flat_map(|row| terms(row.as_ref())).collect();
        let terms: Vec<String> = unique.into_iter().collect();
        let index = terms
            .iter()
            .enumerate()
            .map(|(i, term)| (term.clone(), i))
            .collect();
        Self { terms, index }
    }

    /// Number of terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether the vocabulary is empty.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Term at column `i`.
    pub fn term(&self, i: usize) -> Option<&str> {
        self.terms.get(i).map(String::as_str)
    }

    /// All terms in column order.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Term counts of `text`; terms outside the vocabulary are ignored.
    pub fn count(&self, text: &str) -> Array1<f64> {
        let mut counts = Array1::zeros(self.terms.len());
        for term in terms(text) {
            if let Some(&i) = self.index.get(&term) {
                counts[i] += 1.0;
            }
        }
        counts
    }

    /// Document-term count matrix, one row per input row.
    pub fn count_matrix<S: AsRef<str>>(&self, rows: &[S]) -> Array2<f64> {
        let mut matrix = Array2::zeros((rows.len(), self.terms.len()));
        for (i, row) in rows.iter().enumerate() {
            matrix.row_mut(i).assign(&self.count(row.as_ref()));
        }
        matrix
    }
}

/// Smoothed inverse document frequency weights.
#[derive(Debug, Clone)]
pub struct TfIdf {
    idf: Array1<f64>,
}

impl TfIdf {
    /// Fit `ln((1 + n) / (1 + df)) + 1` per term from a count matrix.
    pub fn fit(counts: &Array2<f64>) -> Self {
        let n = counts.nrows() as f64;
        let idf = counts
            .columns()
            .into_iter()
            .map(|column| {
                let df = column.iter().filter(|&&c| c > 0.0).count() as f64;
                ((1.0 + n) / (1.0 + df)).ln() + 1.0
            })
            .collect();
        Self { idf }
    }

    /// Per-term weights.
    pub const fn idf(&self) -> &Array1<f64> {
        &self.idf
    }

    /// Weight a count vector and scale it to unit length.
    pub fn transform(&self, counts: ArrayView1<'_, f64>) -> Array1<f64> {
        l2_normalize(&counts * &self.idf)
    }

    /// Weight and normalize every row of a count matrix.
    pub fn transform_matrix(&self, counts: &Array2<f64>) -> Array2<f64> {
        let mut weighted = counts.clone();
        for mut row in weighted.rows_mut() {
            let transformed = self.transform(row.view());
            row.assign(&transformed);
        }
        weighted
    }
}

/// Scale `v` to unit length; the zero vector is returned unchanged.
pub fn l2_normalize(mut v: Array1<f64>) -> Array1<f64> {
    let norm = v.dot(&v).sqrt();
    if norm > 0.0 {
        v.mapv_inplace(|x| x / norm);
    }
    v
}
