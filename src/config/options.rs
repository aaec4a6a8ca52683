//! API options for the Nyström approximation and the randomized eigensolver.
//!
//! `NystromOptions` fixes how many eigenfunctions are approximated and from
//! how many landmarks. `RandomizedOptions` tunes the range finder used by the
//! default eigensolver: oversampling, number of power iterations and the seed
//! of its test matrix.

use crate::error::NystromError;

/// Default relative threshold below which a leading eigenvalue counts as zero.
pub const DEFAULT_EIGENVALUE_TOLERANCE: f64 = 1e-10;

/// Construction parameters for a Nyström approximation.
#[derive(Clone, Debug, PartialEq)]
pub struct NystromOptions {
    /// Number of eigenfunctions `k` to approximate
    pub num_eigenfunctions: usize,

    /// Requested landmark count (clamped to the domain size)
    pub num_landmarks: usize,

    /// Eigenvalues `<= tol * D[0]` are treated as numerically zero
    pub eigenvalue_tolerance: f64,
}

impl NystromOptions {
    pub fn new(num_eigenfunctions: usize, num_landmarks: usize) -> Self {
        Self {
            num_eigenfunctions,
            num_landmarks,
            eigenvalue_tolerance: DEFAULT_EIGENVALUE_TOLERANCE,
        }
    }

    pub fn with_eigenvalue_tolerance(mut self, tol: f64) -> Self {
        self.eigenvalue_tolerance = tol;
        self
    }

    /// Reject option combinations that can never produce an approximation.
    pub fn validate(&self) -> Result<(), NystromError> {
        if self.num_eigenfunctions == 0 {
            return Err(NystromError::InvalidParameter(
                "num_eigenfunctions must be at least 1".into(),
            ));
        }
        if !(self.eigenvalue_tolerance.is_finite() && self.eigenvalue_tolerance >= 0.0) {
            return Err(NystromError::InvalidParameter(format!(
                "eigenvalue_tolerance must be finite and non-negative, got {}",
                self.eigenvalue_tolerance
            )));
        }
        Ok(())
    }
}

/// Randomized range-finder parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RandomizedOptions {
    /// Extra columns sampled beyond the target rank
    pub oversampling: usize,

    /// Subspace (power) iterations applied to the sampled range
    pub power_iterations: usize,

    /// Seed for the Gaussian test matrix
    pub seed: u64,
}

impl RandomizedOptions {
    pub fn with_oversampling(mut self, oversampling: usize) -> Self {
        self.oversampling = oversampling;
        self
    }

    pub fn with_power_iterations(mut self, power_iterations: usize) -> Self {
        self.power_iterations = power_iterations;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

impl Default for RandomizedOptions {
    fn default() -> Self {
        Self {
            oversampling: 10,
            power_iterations: 2,
            seed: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_eigenfunctions_is_rejected() {
        let opts = NystromOptions::new(0, 10);
        assert!(matches!(
            opts.validate(),
            Err(NystromError::InvalidParameter(_))
        ));
    }

    #[test]
    fn negative_tolerance_is_rejected() {
        let opts = NystromOptions::new(3, 10).with_eigenvalue_tolerance(-1.0);
        assert!(opts.validate().is_err());
        let opts = NystromOptions::new(3, 10).with_eigenvalue_tolerance(f64::NAN);
        assert!(opts.validate().is_err());
    }

    #[test]
    fn builders_override_defaults() {
        let opts = RandomizedOptions::default()
            .with_oversampling(4)
            .with_power_iterations(0)
            .with_seed(7);
        assert_eq!(opts.oversampling, 4);
        assert_eq!(opts.power_iterations, 0);
        assert_eq!(opts.seed, 7);
        assert!(NystromOptions::new(3, 20).validate().is_ok());
    }
}
