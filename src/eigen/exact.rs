//! Exact dense eigensolver using Faer's self-adjoint decomposition.
//!
//! Decomposes the full matrix and keeps the leading eigenpairs. Cubic in the
//! matrix size, so intended for small gram matrices and as a reference for
//! the randomized solver.

use crate::eigen::{EigenPairs, Eigensolver, check_input, leading_pairs};
use crate::error::NystromError;
use faer::{Mat, Side};

/// Full self-adjoint eigendecomposition, truncated to the target rank.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExactEigensolver;

impl ExactEigensolver {
    pub fn new() -> Self {
        ExactEigensolver
    }
}

impl Eigensolver for ExactEigensolver {
    fn decompose(&self, a: &Mat<f64>, rank: usize) -> Result<EigenPairs, NystromError> {
        check_input(a, rank)?;
        let (values, vectors) = symmetric_eigen(a)?;
        Ok(leading_pairs(&values, vectors.as_ref(), rank))
    }
}

/// All eigenpairs of a symmetric matrix, read from its lower triangle.
pub(crate) fn symmetric_eigen(a: &Mat<f64>) -> Result<(Vec<f64>, Mat<f64>), NystromError> {
    let eig = a
        .as_ref()
        .self_adjoint_eigen(Side::Lower)
        .map_err(|err| NystromError::Decomposition(format!("{err:?}")))?;
    let diag = eig.S();
    let values: Vec<f64> = (0..diag.dim()).map(|idx| diag[idx]).collect();
    let u = eig.U();
    let vectors = Mat::from_fn(u.nrows(), u.ncols(), |i, j| u[(i, j)]);
    Ok((values, vectors))
}
