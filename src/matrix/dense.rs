//! Dense helpers on top of Faer.
//!
//! Precision casts between the `f64` decomposition and the working scalar,
//! kernel-block validation, and the `d × (M·d)` row block of kernel values
//! used by the Nyström evaluator.

use crate::core::traits::{MatrixValuedKernel, Scalar};
use crate::error::NystromError;
use faer::Mat;

/// Convert an `f64` value to the working scalar.
pub fn from_f64<T: Scalar>(x: f64) -> T {
    T::from_f64(x).unwrap_or_else(T::nan)
}

/// Convert a working scalar to `f64`.
pub fn to_f64<T: Scalar>(x: T) -> f64 {
    x.to_f64().unwrap_or(f64::NAN)
}

/// Cast an `f64` matrix down (or across) to the working scalar.
pub fn cast_mat<T: Scalar>(m: &Mat<f64>) -> Mat<T> {
    Mat::from_fn(m.nrows(), m.ncols(), |i, j| from_f64(m[(i, j)]))
}

/// Cast an `f64` vector to the working scalar.
pub fn cast_vec<T: Scalar>(v: &[f64]) -> Vec<T> {
    v.iter().map(|&x| from_f64(x)).collect()
}

/// Fail unless `block` is `dim × dim`.
pub fn check_block_shape<T>(block: &Mat<T>, dim: usize) -> Result<(), NystromError> {
    if block.nrows() != dim || block.ncols() != dim {
        return Err(NystromError::KernelShape {
            expected: dim,
            rows: block.nrows(),
            cols: block.ncols(),
        });
    }
    Ok(())
}

/// Horizontally concatenate `k(point, x_j)` over all landmarks `x_j`.
///
/// Returns the `d × (M·d)` matrix `[k(p, x_0) | k(p, x_1) | ... ]`.
pub fn kernel_row_block<P, K>(
    kernel: &K,
    point: &P,
    landmarks: &[P],
) -> Result<Mat<K::Scalar>, NystromError>
where
    K: MatrixValuedKernel<P> + ?Sized,
{
    let dim = kernel.dimension();
    let mut row = Mat::<K::Scalar>::zeros(dim, landmarks.len() * dim);
    for (j, landmark) in landmarks.iter().enumerate() {
        let block = kernel.evaluate(point, landmark);
        check_block_shape(&block, dim)?;
        for d1 in 0..dim {
            for d2 in 0..dim {
                row[(d1, j * dim + d2)] = block[(d1, d2)];
            }
        }
    }
    Ok(row)
}

/// Dense product `a · b` for the working scalar.
///
/// # Panics
/// Panics if the inner dimensions disagree.
pub fn matmul<T: Scalar>(a: &Mat<T>, b: &Mat<T>) -> Mat<T> {
    assert_eq!(a.ncols(), b.nrows(), "inner dimensions must agree");
    let mut c = Mat::<T>::zeros(a.nrows(), b.ncols());
    for j in 0..b.ncols() {
        for l in 0..a.ncols() {
            let blj = b[(l, j)];
            if blj == T::zero() {
                continue;
            }
            for i in 0..a.nrows() {
                c[(i, j)] = c[(i, j)] + a[(i, l)] * blj;
            }
        }
    }
    c
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::wrappers::FnKernel;
    use approx::assert_abs_diff_eq;

    #[test]
    fn cast_round_trips_small_integers_through_f32() {
        let m = Mat::from_fn(2, 3, |i, j| (i * 3 + j) as f64);
        let c: Mat<f32> = cast_mat(&m);
        assert_eq!(c.nrows(), 2);
        assert_eq!(c.ncols(), 3);
        assert_eq!(c[(1, 2)], 5.0f32);
        assert_eq!(cast_vec::<f32>(&[0.5, 2.0]), vec![0.5f32, 2.0]);
    }

    #[test]
    fn wrong_block_shape_is_reported() {
        let block = Mat::<f64>::zeros(2, 3);
        let err = check_block_shape(&block, 2).unwrap_err();
        assert!(matches!(
            err,
            NystromError::KernelShape {
                expected: 2,
                rows: 2,
                cols: 3
            }
        ));
    }

    #[test]
    fn row_block_concatenates_kernel_blocks() {
        let k = FnKernel::new(2, |x: &f64, y: &f64| {
            Mat::from_fn(2, 2, |i, j| x * y + (i * 2 + j) as f64)
        });
        let landmarks = vec![1.0, 2.0, 3.0];
        let row = kernel_row_block(&k, &2.0, &landmarks).unwrap();
        assert_eq!(row.nrows(), 2);
        assert_eq!(row.ncols(), 6);
        assert_eq!(row[(0, 0)], 2.0);
        assert_eq!(row[(1, 1)], 5.0);
        assert_eq!(row[(0, 4)], 6.0);
        assert_eq!(row[(1, 5)], 9.0);
    }

    #[test]
    fn matmul_matches_manual_product() {
        let a = Mat::from_fn(2, 3, |i, j| (i + 2 * j) as f64);
        let b = Mat::from_fn(3, 2, |i, j| (1 + i * j) as f64);
        let c = matmul(&a, &b);
        for i in 0..2 {
            for j in 0..2 {
                let expected: f64 = (0..3).map(|l| a[(i, l)] * b[(l, j)]).sum();
                assert_abs_diff_eq!(c[(i, j)], expected, epsilon = 1e-12);
            }
        }
    }
}
