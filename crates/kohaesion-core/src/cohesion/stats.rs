//! Result shapes shared by the cohesion metrics.

use serde::Serialize;

/// Binary-overlap result: how many of the compared pairs overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OverlapRatio {
    /// Pairs whose word-class sets intersect.
    pub overlapping: usize,
    /// Pairs compared.
    pub compared: usize,
}

impl OverlapRatio {
    /// `overlapping / compared`, or 0 when nothing was compared.
    pub fn ratio(&self) -> f64 {
        if self.compared == 0 {
            0.0
        } else {
            self.overlapping as f64 / self.compared as f64
        }
    }
}

/// Mean, sample standard deviation and sample size of a set of values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Statistic {
    /// Arithmetic mean.
    pub mean: f64,
    /// Sample standard deviation (0 for fewer than two values).
    pub stdev: f64,
    /// Number of values.
    pub n: usize,
}

impl Statistic {
    /// Summarize `values`. An empty slice gives all zeros.
    pub fn from_values(values: &[f64]) -> Self {
        let n = values.len();
        if n == 0 {
            return Self {
                mean: 0.0,
                stdev: 0.0,
                n,
            };
        }
        let mean = values.iter().sum::<f64>() / n as f64;
        let stdev = if n < 2 {
            0.0
        } else {
            let variance =
                values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
            variance.sqrt()
        };
        Self { mean, stdev, n }
    }

    /// Summarize integer counts.
    pub fn from_counts(counts: &[usize]) -> Self {
        let values: Vec<f64> = counts.iter().map(|&c| c as f64).collect();
        Self::from_values(&values)
    }
}
