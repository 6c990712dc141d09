//! Truncated singular value decomposition.
//!
//! Subspace iteration on `AᵀA` from a fixed pseudo-random start, followed by
//! a Rayleigh–Ritz step: the small projected Gram matrix is diagonalized
//! with cyclic Jacobi rotations. The result only depends on the input
//! matrix, so refitting the same corpus yields the same basis.
//!
//! When the matrix has rank below the requested component count, the
//! surplus components have singular value 0 and carry no information. The
//! fit logs a warning and reports the rank.

use std::sync::atomic::{AtomicBool, Ordering};

use ndarray::{Array1, Array2, Axis, s};
use tracing::{debug, warn};

use crate::error::{MetricError, MetricResult};

/// Extra basis vectors carried along to speed up convergence.
const OVERSAMPLING: usize = 5;
/// Upper bound on subspace iterations.
const MAX_ITERATIONS: usize = 100;
/// Relative change of the leading singular values that counts as converged.
const TOLERANCE: f64 = 1e-10;
/// Columns shorter than this are treated as linearly dependent.
const EPSILON: f64 = 1e-12;
/// Singular values below this fraction of the largest one count as zero.
const RANK_TOLERANCE: f64 = 1e-6;

/// Leading right singular vectors and singular values of a matrix.
#[derive(Debug, Clone)]
pub struct TruncatedSvd {
    /// `k × terms`; row `i` is the i-th right singular vector.
    pub components: Array2<f64>,
    /// The k largest singular values, descending.
    pub singular_values: Array1<f64>,
    /// Iterations until convergence.
    pub iterations: usize,
    /// Number of components with a non-zero singular value.
    pub rank: usize,
}

impl TruncatedSvd {
    /// Fit `k` components of `a` (`documents × terms`).
    ///
    /// Checks `cancel` before every iteration.
    pub fn fit(a: &Array2<f64>, k: usize, cancel: &AtomicBool) -> MetricResult<Self> {
        let terms = a.ncols();
        if k == 0 || k > terms {
            return Err(MetricError::InvalidInput(format!(
                "cannot fit {k} components to {terms} terms"
            )));
        }
        let width = (k + OVERSAMPLING).min(terms);

        let mut q = orthonormalize(start_matrix(terms, width));
        let mut previous: Option<Array1<f64>> = None;
        let mut basis = q.clone();
        let mut values = Array1::zeros(width);
        let mut iterations = 0;

        while iterations < MAX_ITERATIONS {
            if cancel.load(Ordering::Relaxed) {
                debug!(iterations, "svd cancelled");
                return Err(MetricError::Cancelled);
            }
            iterations += 1;

            let projected = a.dot(&q);
            q = orthonormalize(a.t().dot(&projected));

            let projected = a.dot(&q);
            let (eigenvalues, eigenvectors) = symmetric_eigen(projected.t().dot(&projected));
            basis = q.dot(&eigenvectors);
            values = eigenvalues.mapv(|l| l.max(0.0).sqrt());

            let leading = values.slice(s![..k]).to_owned();
            let converged = previous.as_ref().is_some_and(|prev| {
                prev.iter()
                    .zip(&leading)
                    .all(|(p, c)| (p - c).abs() <= TOLERANCE * c.abs().max(1.0))
            });
            previous = Some(leading);
            if converged {
                break;
            }
        }
        debug!(iterations, "svd converged");

        let mut components = basis.slice(s![.., ..k]).t().to_owned();
        for mut row in components.axis_iter_mut(Axis(0)) {
            let dominant = row
                .iter()
                .copied()
                .fold(0.0f64, |best, x| if x.abs() > best.abs() { x } else { best });
            if dominant < 0.0 {
                row.mapv_inplace(|x| -x);
            }
        }

        let singular_values = values.slice(s![..k]).to_owned();
        let threshold = RANK_TOLERANCE * singular_values[0].max(EPSILON);
        let rank = singular_values.iter().filter(|&&v| v > threshold).count();
        if rank < k {
            warn!(
                requested = k,
                rank,
                "matrix rank is below the requested components; the surplus components carry no variance"
            );
        }

        Ok(Self {
            components,
            singular_values,
            iterations,
            rank,
        })
    }
}

/// Deterministic `rows × cols` start matrix with entries in [-0.5, 0.5).
fn start_matrix(rows: usize, cols: usize) -> Array2<f64> {
    let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
    Array2::from_shape_fn((rows, cols), |_| {
        // splitmix64
        state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^= z >> 31;
        (z >> 11) as f64 / (1u64 << 53) as f64 - 0.5
    })
}

/// Modified Gram–Schmidt on the columns. Dependent columns become zero.
fn orthonormalize(mut m: Array2<f64>) -> Array2<f64> {
    for j in 0..m.ncols() {
        for i in 0..j {
            let previous = m.column(i).to_owned();
            let r = previous.dot(&m.column(j));
            m.column_mut(j).scaled_add(-r, &previous);
        }
        let norm = m.column(j).dot(&m.column(j)).sqrt();
        if norm > EPSILON {
            m.column_mut(j).mapv_inplace(|x| x / norm);
        } else {
            m.column_mut(j).fill(0.0);
        }
    }
    m
}

/// Eigen-decomposition of a symmetric matrix by cyclic Jacobi rotations.
///
/// Returns eigenvalues in descending order and the matching eigenvectors as
/// columns.
pub(crate) fn symmetric_eigen(mut a: Array2<f64>) -> (Array1<f64>, Array2<f64>) {
    let n = a.nrows();
    let mut v = Array2::<f64>::eye(n);

    for _ in 0..MAX_ITERATIONS {
        let off_diagonal: f64 = (0..n)
            .flat_map(|p| (0..n).filter(move |&q| q != p).map(move |q| (p, q)))
            .map(|(p, q)| a[[p, q]].powi(2))
            .sum();
        let scale: f64 = a.iter().map(|x| x * x).sum::<f64>().max(f64::MIN_POSITIVE);
        if off_diagonal <= 1e-30 * scale {
            break;
        }

        for p in 0..n {
            for q in p + 1..n {
                let apq = a[[p, q]];
                if apq == 0.0 {
                    continue;
                }
                let theta = (a[[q, q]] - a[[p, p]]) / (2.0 * apq);
                let t = theta.signum() / (theta.abs() + theta.mul_add(theta, 1.0).sqrt());
                let c = 1.0 / t.mul_add(t, 1.0).sqrt();
                let s = t * c;

                for k in 0..n {
                    let (akp, akq) = (a[[k, p]], a[[k, q]]);
                    a[[k, p]] = c * akp - s * akq;
                    a[[k, q]] = s * akp + c * akq;
                }
                for k in 0..n {
                    let (apk, aqk) = (a[[p, k]], a[[q, k]]);
                    a[[p, k]] = c * apk - s * aqk;
                    a[[q, k]] = s * apk + c * aqk;
                }
                for k in 0..n {
                    let (vkp, vkq) = (v[[k, p]], v[[k, q]]);
                    v[[k, p]] = c * vkp - s * vkq;
                    v[[k, q]] = s * vkp + c * vkq;
                }
            }
        }
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&i, &j| a[[j, j]].total_cmp(&a[[i, i]]));
    let values = order.iter().map(|&i| a[[i, i]]).collect();
    let vectors = v.select(Axis(1), &order);
    (values, vectors)
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-8
    }

    #[test]
    fn jacobi_diagonalizes_symmetric_matrix() {
        let m = array![[2.0, 1.0], [1.0, 2.0]];
        let (values, vectors) = symmetric_eigen(m.clone());
        assert!(close(values[0], 3.0));
        assert!(close(values[1], 1.0));
        // M v = λ v
        for i in 0..2 {
            let v = vectors.column(i);
            let mv = m.dot(&v);
            for k in 0..2 {
                assert!(close(mv[k], values[i] * v[k]));
            }
        }
    }

    #[test]
    fn recovers_singular_values_of_diagonal_matrix() {
        let a = array![
            [3.0, 0.0, 0.0, 0.0],
            [0.0, 2.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0]
        ];
        let svd = TruncatedSvd::fit(&a, 2, &AtomicBool::new(false)).unwrap();
        assert!(close(svd.singular_values[0], 3.0));
        assert!(close(svd.singular_values[1], 2.0));
        assert!(close(svd.components[[0, 0]], 1.0));
        assert!(close(svd.components[[1, 1]], 1.0));
    }

    #[test]
    fn rank_deficient_matrix_reports_rank() {
        let a = array![
            [3.0, 0.0, 0.0, 0.0],
            [0.0, 2.0, 0.0, 0.0],
            [0.0, 0.0, 0.0, 0.0]
        ];
        let svd = TruncatedSvd::fit(&a, 3, &AtomicBool::new(false)).unwrap();
        assert_eq!(svd.rank, 2);
        assert!(close(svd.singular_values[1], 2.0));
        assert!(svd.singular_values[2].abs() < 1e-6);

        let full = TruncatedSvd::fit(&a, 2, &AtomicBool::new(false)).unwrap();
        assert_eq!(full.rank, 2);
    }

    #[test]
    fn components_are_orthonormal() {
        let a = array![
            [1.0, 2.0, 0.0, 1.0, 0.0],
            [0.0, 1.0, 3.0, 0.0, 1.0],
            [2.0, 0.0, 1.0, 1.0, 0.0],
            [1.0, 1.0, 1.0, 0.0, 2.0]
        ];
        let svd = TruncatedSvd::fit(&a, 3, &AtomicBool::new(false)).unwrap();
        let gram = svd.components.dot(&svd.components.t());
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!(close(gram[[i, j]], expected), "{i},{j}: {}", gram[[i, j]]);
            }
        }
        assert!(svd.singular_values[0] >= svd.singular_values[1]);
        assert!(svd.singular_values[1] >= svd.singular_values[2]);
    }

    #[test]
    fn signs_are_fixed() {
        let a = array![[-3.0, 0.0, 0.0], [0.0, -1.0, 0.0]];
        let svd = TruncatedSvd::fit(&a, 1, &AtomicBool::new(false)).unwrap();
        assert!(svd.components[[0, 0]] > 0.0);
    }

    #[test]
    fn fit_is_deterministic() {
        let a = array![[1.0, 2.0, 0.0], [0.0, 1.0, 3.0], [2.0, 0.0, 1.0]];
        let first = TruncatedSvd::fit(&a, 2, &AtomicBool::new(false)).unwrap();
        let second = TruncatedSvd::fit(&a, 2, &AtomicBool::new(false)).unwrap();
        assert_eq!(first.components, second.components);
    }

    #[test]
    fn cancellation() {
        let a = array![[1.0, 0.0], [0.0, 1.0]];
        let err = TruncatedSvd::fit(&a, 1, &AtomicBool::new(true)).unwrap_err();
        assert!(matches!(err, MetricError::Cancelled));
    }
}
