//! Gaussian kernel: k(x, y) = exp(-‖x - y‖² / σ²)

use crate::core::traits::ScalarKernel;
use crate::error::NystromError;

/// Gaussian (squared exponential) scalar kernel on coordinate points.
///
/// Points are anything that can be viewed as a coordinate slice, such as
/// `[f64; 3]` or `Vec<f64>`. σ controls the correlation length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianKernel {
    sigma: f64,
    sigma2: f64,
}

impl GaussianKernel {
    /// Create a Gaussian kernel with width `sigma`.
    ///
    /// # Errors
    /// `InvalidParameter` unless `sigma` is finite and positive.
    pub fn new(sigma: f64) -> Result<Self, NystromError> {
        if !(sigma.is_finite() && sigma > 0.0) {
            return Err(NystromError::InvalidParameter(format!(
                "gaussian kernel sigma must be positive, got {sigma}"
            )));
        }
        Ok(Self {
            sigma,
            sigma2: sigma * sigma,
        })
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }
}

impl<P: AsRef<[f64]>> ScalarKernel<P> for GaussianKernel {
    fn evaluate(&self, x: &P, y: &P) -> f64 {
        let squared_distance: f64 = x
            .as_ref()
            .iter()
            .zip(y.as_ref())
            .map(|(a, b)| (a - b) * (a - b))
            .sum();
        (-squared_distance / self.sigma2).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn value_at_identical_points_is_one() {
        let k = GaussianKernel::new(2.0).unwrap();
        let x = [1.0, -3.0, 0.5];
        assert_eq!(k.evaluate(&x, &x), 1.0);
    }

    #[test]
    fn matches_closed_form() {
        let k = GaussianKernel::new(2.0).unwrap();
        let v = k.evaluate(&vec![0.0, 0.0], &vec![1.0, 1.0]);
        assert_abs_diff_eq!(v, (-0.5f64).exp(), epsilon = 1e-15);
        assert_eq!(
            k.evaluate(&[0.0, 2.0], &[1.0, 0.5]),
            k.evaluate(&[1.0, 0.5], &[0.0, 2.0])
        );
    }

    #[test]
    fn rejects_non_positive_sigma() {
        assert!(GaussianKernel::new(0.0).is_err());
        assert!(GaussianKernel::new(-1.0).is_err());
        assert!(GaussianKernel::new(f64::INFINITY).is_err());
    }
}
