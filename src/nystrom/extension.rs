//! Point-independent part of the Nyström extension.
//!
//! With landmark eigenpairs `(U, D)`, `M` landmarks and a domain of `N`
//! points, the extension matrix is
//!
//! ```text
//! E = sqrt(M / N) · U[:, :k] · diag(D[:k])⁻¹
//! ```
//!
//! and the operator eigenvalues over the full domain are `D[:k] · N / M`.

use crate::core::traits::Scalar;
use crate::eigen::EigenPairs;
use crate::error::NystromError;
use crate::matrix::dense::from_f64;
use faer::Mat;

/// Extension matrix and renormalized eigenvalues, in the working precision.
#[derive(Clone, Debug)]
pub struct NystromExtension<T> {
    /// `(M·d) × k` extension matrix
    pub matrix: Mat<T>,
    /// `k` eigenvalues of the kernel operator over the full domain
    pub eigenvalues: Vec<T>,
}

/// Build the extension from landmark eigenpairs.
///
/// `tolerance` is relative to the leading eigenvalue: every `D[j]`, `j < k`,
/// must exceed `tolerance · D[0]` and zero.
///
/// # Errors
/// * `NumericalRank` if a leading eigenvalue is (numerically) zero
/// * `Decomposition` if fewer than `k` eigenpairs are available
/// * `InvalidParameter` for an empty domain or more landmarks than points
pub fn build_extension<T: Scalar>(
    pairs: &EigenPairs,
    num_eigenfunctions: usize,
    num_landmarks: usize,
    domain_size: usize,
    tolerance: f64,
) -> Result<NystromExtension<T>, NystromError> {
    let k = num_eigenfunctions;
    if pairs.rank() < k || pairs.vectors.ncols() < k {
        return Err(NystromError::Decomposition(format!(
            "{} eigenpairs available, {} eigenfunctions requested",
            pairs.rank(),
            k
        )));
    }
    if num_landmarks == 0 || domain_size == 0 || num_landmarks > domain_size {
        return Err(NystromError::InvalidParameter(format!(
            "landmark count {num_landmarks} must be in 1..={domain_size}"
        )));
    }

    let leading = pairs.values.first().copied().unwrap_or(0.0);
    let threshold = tolerance * leading;
    for (index, &value) in pairs.values[..k].iter().enumerate() {
        if !(value > 0.0 && value > threshold) {
            return Err(NystromError::NumericalRank {
                index,
                value,
                threshold,
            });
        }
    }

    let norm_factor = num_landmarks as f64 / domain_size as f64;
    let sqrt_norm = norm_factor.sqrt();
    let u = &pairs.vectors;
    let d = &pairs.values;
    let matrix = Mat::from_fn(u.nrows(), k, |i, j| from_f64::<T>(sqrt_norm * u[(i, j)] / d[j]));
    let eigenvalues = d[..k]
        .iter()
        .map(|&v| from_f64::<T>((1.0 / norm_factor) * v))
        .collect();

    Ok(NystromExtension {
        matrix,
        eigenvalues,
    })
}
