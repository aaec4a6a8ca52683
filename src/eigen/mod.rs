//! Truncated symmetric eigensolvers.
//!
//! The Nyström core only needs the leading eigenpairs of a symmetric
//! positive semi-definite gram matrix. Any [`Eigensolver`] can be plugged in;
//! the crate ships a randomized range-finder solver (the default) and an
//! exact dense solver for small matrices.
//!
//! # Contract
//! `decompose(a, rank)` returns `rank` orthonormal columns and `rank`
//! non-negative eigenvalues sorted in non-increasing order, and is
//! deterministic for fixed inputs.

use crate::error::NystromError;
use faer::{Mat, MatRef};

/// Leading eigenpairs of a symmetric matrix, in `f64`.
#[derive(Clone, Debug)]
pub struct EigenPairs {
    /// `n × r` matrix with orthonormal eigenvectors as columns
    pub vectors: Mat<f64>,
    /// `r` eigenvalues, non-negative and non-increasing
    pub values: Vec<f64>,
}

impl EigenPairs {
    /// Number of returned eigenpairs.
    pub fn rank(&self) -> usize {
        self.values.len()
    }

    /// Check the solver contract for an `n × n` input and target `rank`.
    pub fn validate(&self, n: usize, rank: usize) -> Result<(), NystromError> {
        if self.vectors.nrows() != n {
            return Err(NystromError::Decomposition(format!(
                "eigenvectors have {} rows, expected {}",
                self.vectors.nrows(),
                n
            )));
        }
        if self.vectors.ncols() != self.values.len() {
            return Err(NystromError::Decomposition(format!(
                "{} eigenvectors but {} eigenvalues",
                self.vectors.ncols(),
                self.values.len()
            )));
        }
        if self.values.len() < rank {
            return Err(NystromError::Decomposition(format!(
                "solver returned {} eigenpairs, {} requested",
                self.values.len(),
                rank
            )));
        }
        for (i, &v) in self.values.iter().enumerate() {
            if !v.is_finite() || v < 0.0 {
                return Err(NystromError::Decomposition(format!(
                    "eigenvalue {i} is {v}, expected finite and non-negative"
                )));
            }
            if i > 0 && v > self.values[i - 1] {
                return Err(NystromError::Decomposition(format!(
                    "eigenvalues not sorted at index {i}"
                )));
            }
        }
        Ok(())
    }
}

/// Pluggable truncated eigendecomposition strategy.
pub trait Eigensolver {
    /// Leading `rank` eigenpairs of the symmetric matrix `a`.
    fn decompose(&self, a: &Mat<f64>, rank: usize) -> Result<EigenPairs, NystromError>;
}

impl<S: Eigensolver + ?Sized> Eigensolver for &S {
    fn decompose(&self, a: &Mat<f64>, rank: usize) -> Result<EigenPairs, NystromError> {
        (**self).decompose(a, rank)
    }
}

/// Check that `a` is square and `rank <= n`; returns `n`.
pub(crate) fn check_input(a: &Mat<f64>, rank: usize) -> Result<usize, NystromError> {
    let n = a.nrows();
    if a.ncols() != n {
        return Err(NystromError::Decomposition(format!(
            "matrix must be square, got {}x{}",
            n,
            a.ncols()
        )));
    }
    if rank > n {
        return Err(NystromError::RankExceeded {
            requested: rank,
            available: n,
        });
    }
    Ok(n)
}

/// Select the `rank` largest eigenpairs from a full (unordered) decomposition.
///
/// Small negative eigenvalues from round-off are clamped to zero.
pub(crate) fn leading_pairs(values: &[f64], vectors: MatRef<'_, f64>, rank: usize) -> EigenPairs {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[b].total_cmp(&values[a]));
    order.truncate(rank);

    let scale = values.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    let picked: Vec<f64> = order
        .iter()
        .map(|&idx| {
            let v = values[idx];
            if v < 0.0 {
                if v.abs() > 1e-8 * scale.max(f64::MIN_POSITIVE) {
                    log::warn!("clamping negative eigenvalue {v:.3e}; matrix is not positive semi-definite");
                }
                0.0
            } else {
                v
            }
        })
        .collect();
    let selected = Mat::from_fn(vectors.nrows(), order.len(), |i, j| vectors[(i, order[j])]);
    EigenPairs {
        vectors: selected,
        values: picked,
    }
}

pub mod exact;
pub use exact::ExactEigensolver;

pub mod randomized;
pub use randomized::RandomizedEigensolver;
