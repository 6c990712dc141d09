//! Pairwise cohesion metrics.
//!
//! Every metric here classifies the units of a document (sentences or
//! paragraphs), then compares them pair by pair under one of two regimes:
//!
//! - [`Scope::Local`]: each unit against the one before it (n − 1 pairs)
//! - [`Scope::Global`]: every unordered pair (n·(n − 1)/2 pairs)
//!
//! Pairs are enumerated in lexicographic index order so per-pair values come
//! out in a reproducible sequence.

pub mod lsa;
pub mod referential;
pub mod stats;

use serde::Serialize;

use crate::error::{MetricError, MetricResult};

pub use stats::{OverlapRatio, Statistic};

/// Which unit pairs a cohesion metric compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Adjacent units.
    Local,
    /// All unordered pairs.
    Global,
}

impl Scope {
    /// Index pairs `(earlier, later)` compared for `n` units.
    pub fn pairs(self, n: usize) -> Vec<(usize, usize)> {
        match self {
            Self::Local => (1..n).map(|i| (i - 1, i)).collect(),
            Self::Global => (0..n)
                .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
                .collect(),
        }
    }

    /// Number of pairs compared for `n` units.
    pub const fn pair_count(self, n: usize) -> usize {
        match self {
            Self::Local => n.saturating_sub(1),
            Self::Global => n * n.saturating_sub(1) / 2,
        }
    }

    /// Fewest units for which the metric is defined.
    ///
    /// Local metrics need one pair. Global metrics accept a single unit and
    /// report zero pairs.
    pub const fn minimum_units(self) -> usize {
        match self {
            Self::Local => 2,
            Self::Global => 1,
        }
    }

    /// Fail with [`MetricError::InsufficientData`] when `found` units are
    /// too few for this scope.
    pub(crate) fn require(
        self,
        metric: &'static str,
        unit: &'static str,
        found: usize,
    ) -> MetricResult<()> {
        let required = self.minimum_units();
        if found < required {
            return Err(MetricError::InsufficientData {
                metric,
                unit,
                required,
                found,
            });
        }
        Ok(())
    }
}
