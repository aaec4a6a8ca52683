//! Matrix-valued kernels built from simpler ones.

use crate::core::traits::{MatrixValuedKernel, Scalar, ScalarKernel};
use crate::error::NystromError;
use crate::matrix::dense::from_f64;
use faer::Mat;
use std::marker::PhantomData;

/// k(x, y) · I_d: a scalar kernel applied independently to each of `d` outputs.
#[derive(Debug, Clone)]
pub struct UncorrelatedMatrixValuedKernel<S, T = f64> {
    scalar: S,
    dim: usize,
    _scalar_type: PhantomData<T>,
}

impl<S, T: Scalar> UncorrelatedMatrixValuedKernel<S, T> {
    /// # Errors
    /// `InvalidParameter` if `dim` is 0.
    pub fn new(scalar: S, dim: usize) -> Result<Self, NystromError> {
        if dim == 0 {
            return Err(NystromError::InvalidParameter(
                "output dimension must be at least 1".into(),
            ));
        }
        Ok(Self {
            scalar,
            dim,
            _scalar_type: PhantomData,
        })
    }

    pub fn scalar_kernel(&self) -> &S {
        &self.scalar
    }
}

impl<P, S, T> MatrixValuedKernel<P> for UncorrelatedMatrixValuedKernel<S, T>
where
    S: ScalarKernel<P>,
    T: Scalar,
{
    type Scalar = T;

    fn dimension(&self) -> usize {
        self.dim
    }

    fn evaluate(&self, x: &P, y: &P) -> Mat<T> {
        let v: T = from_f64(self.scalar.evaluate(x, y));
        let mut m = Mat::<T>::zeros(self.dim, self.dim);
        for i in 0..self.dim {
            m[(i, i)] = v;
        }
        m
    }
}

/// s · K(x, y) for a matrix-valued kernel K and a positive scale s.
#[derive(Debug, Clone)]
pub struct ScaledKernel<K> {
    kernel: K,
    scale: f64,
}

impl<K> ScaledKernel<K> {
    /// # Errors
    /// `InvalidParameter` unless `scale` is finite and positive.
    pub fn new(kernel: K, scale: f64) -> Result<Self, NystromError> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(NystromError::InvalidParameter(format!(
                "kernel scale must be positive, got {scale}"
            )));
        }
        Ok(Self { kernel, scale })
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }
}

impl<P, K: MatrixValuedKernel<P>> MatrixValuedKernel<P> for ScaledKernel<K> {
    type Scalar = K::Scalar;

    fn dimension(&self) -> usize {
        self.kernel.dimension()
    }

    fn evaluate(&self, x: &P, y: &P) -> Mat<K::Scalar> {
        let s: K::Scalar = from_f64(self.scale);
        let mut m = self.kernel.evaluate(x, y);
        for j in 0..m.ncols() {
            for i in 0..m.nrows() {
                m[(i, j)] = m[(i, j)] * s;
            }
        }
        m
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::GaussianKernel;

    #[test]
    fn uncorrelated_kernel_is_diagonal() {
        let k: UncorrelatedMatrixValuedKernel<_, f64> =
            UncorrelatedMatrixValuedKernel::new(GaussianKernel::new(1.0).unwrap(), 3).unwrap();
        let x = [0.0, 0.0];
        let y = [1.0, 0.0];
        let m = k.evaluate(&x, &y);
        assert_eq!(MatrixValuedKernel::<[f64; 2]>::dimension(&k), 3);
        assert_eq!((m.nrows(), m.ncols()), (3, 3));
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { (-1.0f64).exp() } else { 0.0 };
                assert_eq!(m[(i, j)], expected);
            }
        }
    }

    #[test]
    fn scaled_kernel_multiplies_every_entry() {
        let base: UncorrelatedMatrixValuedKernel<_, f32> =
            UncorrelatedMatrixValuedKernel::new(GaussianKernel::new(1.0).unwrap(), 2).unwrap();
        let k = ScaledKernel::new(base, 4.0).unwrap();
        let x = [0.5];
        let m = k.evaluate(&x, &x);
        assert_eq!(m[(0, 0)], 4.0f32);
        assert_eq!(m[(1, 1)], 4.0f32);
        assert_eq!(m[(0, 1)], 0.0f32);
        assert!(ScaledKernel::new(GaussianKernel::new(1.0).unwrap(), 0.0).is_err());
    }

    #[test]
    fn zero_dimension_is_rejected() {
        let k = UncorrelatedMatrixValuedKernel::<_, f64>::new(GaussianKernel::new(1.0).unwrap(), 0);
        assert!(k.is_err());
    }
}
