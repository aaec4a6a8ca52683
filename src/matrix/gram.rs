//! Block gram matrix assembly for matrix-valued kernels.
//!
//! For landmarks `x_0..x_{M-1}` and a kernel of dimension `d`, the gram
//! matrix is the `(M·d) × (M·d)` matrix whose `(i, j)` block is
//! `k(x_i, x_j)`. Only blocks with `i <= j` are evaluated; block `(j, i)` is
//! the copied transpose, so the result is exactly symmetric.

use crate::core::traits::{MatrixValuedKernel, Scalar};
use crate::error::NystromError;
use crate::matrix::dense::{check_block_shape, to_f64};
use faer::Mat;

/// Relative tolerance for the symmetry check of diagonal blocks.
const DIAGONAL_SYMMETRY_TOL: f64 = 1e-10;

/// Assemble the gram matrix of `kernel` over `landmarks`, in `f64`.
///
/// # Errors
/// * `KernelShape` if any block is not `d × d`
/// * `AsymmetricKernel` if some `k(x_i, x_i)` is not symmetric
/// * `NonFiniteKernel` if a kernel entry is NaN or infinite
pub fn build_gram<P, K>(kernel: &K, landmarks: &[P]) -> Result<Mat<f64>, NystromError>
where
    K: MatrixValuedKernel<P> + ?Sized,
{
    let dim = kernel.dimension();
    let m = landmarks.len();
    let mut gram = Mat::<f64>::zeros(m * dim, m * dim);

    for i in 0..m {
        for j in i..m {
            let block = kernel.evaluate(&landmarks[i], &landmarks[j]);
            check_block_shape(&block, dim)?;
            if i == j {
                check_diagonal_block(&block, dim, i)?;
            }
            for d1 in 0..dim {
                for d2 in 0..dim {
                    let v = to_f64(block[(d1, d2)]);
                    let (row, col) = (i * dim + d1, j * dim + d2);
                    if !v.is_finite() {
                        return Err(NystromError::NonFiniteKernel { row, col });
                    }
                    gram[(row, col)] = v;
                    gram[(col, row)] = v;
                }
            }
        }
    }
    Ok(gram)
}

fn check_diagonal_block<T: Scalar>(
    block: &Mat<T>,
    dim: usize,
    landmark: usize,
) -> Result<(), NystromError> {
    for d1 in 0..dim {
        for d2 in (d1 + 1)..dim {
            let upper = to_f64(block[(d1, d2)]);
            let lower = to_f64(block[(d2, d1)]);
            let scale = upper.abs().max(lower.abs()).max(1.0);
            if (upper - lower).abs() > DIAGONAL_SYMMETRY_TOL * scale {
                return Err(NystromError::AsymmetricKernel { landmark });
            }
        }
    }
    Ok(())
}

/// Copy block `(i, j)` of size `dim × dim` out of a block matrix.
pub fn gram_block(gram: &Mat<f64>, dim: usize, i: usize, j: usize) -> Mat<f64> {
    Mat::from_fn(dim, dim, |r, c| gram[(i * dim + r, j * dim + c)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::wrappers::FnKernel;

    fn coupled_kernel() -> impl MatrixValuedKernel<f64, Scalar = f64> {
        // k(x, y) = [[xy, x], [y, 1 + xy]], so k(y, x) = k(x, y)ᵀ
        FnKernel::new(2, |x: &f64, y: &f64| {
            let mut m = Mat::<f64>::zeros(2, 2);
            m[(0, 0)] = x * y;
            m[(0, 1)] = *x;
            m[(1, 0)] = *y;
            m[(1, 1)] = 1.0 + x * y;
            m
        })
    }

    #[test]
    fn blocks_hold_kernel_values_and_transposes() {
        let landmarks = vec![0.5, 1.5, -2.0];
        let gram = build_gram(&coupled_kernel(), &landmarks).unwrap();
        assert_eq!(gram.nrows(), 6);
        assert_eq!(gram.ncols(), 6);

        let b01 = gram_block(&gram, 2, 0, 1);
        assert_eq!(b01[(0, 0)], 0.75);
        assert_eq!(b01[(0, 1)], 0.5);
        assert_eq!(b01[(1, 0)], 1.5);

        for i in 0..3 {
            for j in 0..3 {
                let bij = gram_block(&gram, 2, i, j);
                let bji = gram_block(&gram, 2, j, i);
                for r in 0..2 {
                    for c in 0..2 {
                        assert_eq!(bij[(r, c)].to_bits(), bji[(c, r)].to_bits());
                    }
                }
            }
        }
    }

    #[test]
    fn kernel_is_evaluated_once_per_unordered_pair() {
        use std::cell::Cell;
        let calls = Cell::new(0usize);
        let k = FnKernel::new(1, |x: &f64, y: &f64| {
            calls.set(calls.get() + 1);
            Mat::from_fn(1, 1, |_, _| (-(x - y) * (x - y)).exp())
        });
        let landmarks: Vec<f64> = (0..6).map(|i| i as f64).collect();
        build_gram(&k, &landmarks).unwrap();
        assert_eq!(calls.get(), 6 * 7 / 2);
    }

    #[test]
    fn malformed_blocks_are_rejected() {
        let wrong_shape = FnKernel::new(2, |_: &f64, _: &f64| Mat::<f64>::zeros(2, 1));
        assert!(matches!(
            build_gram(&wrong_shape, &[0.0, 1.0]),
            Err(NystromError::KernelShape { .. })
        ));

        let asymmetric = FnKernel::new(2, |_: &f64, _: &f64| {
            Mat::from_fn(2, 2, |i, j| if i < j { 1.0 } else { 0.0 })
        });
        assert!(matches!(
            build_gram(&asymmetric, &[0.0, 1.0]),
            Err(NystromError::AsymmetricKernel { landmark: 0 })
        ));

        let nan = FnKernel::new(1, |_: &f64, _: &f64| Mat::from_fn(1, 1, |_, _| f64::NAN));
        assert!(matches!(
            build_gram(&nan, &[0.0]),
            Err(NystromError::NonFiniteKernel { row: 0, col: 0 })
        ));
    }
}
