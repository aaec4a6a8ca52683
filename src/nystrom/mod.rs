//! Nyström approximation of a matrix-valued kernel's eigenfunctions.
//!
//! Construction runs once, eagerly:
//! 1. sample `M = min(num_landmarks, N)` landmarks from the domain,
//! 2. assemble the `(M·d) × (M·d)` gram matrix in `f64`,
//! 3. decompose it to rank `k·d` with an [`Eigensolver`],
//! 4. precompute the extension matrix and renormalized eigenvalues.
//!
//! Afterwards [`Nystrom::evaluate`] gives the `d × k` matrix of eigenfunction
//! values at any point, landmark or not, using only `M` kernel evaluations
//! and the cached extension matrix. The approximation is immutable and can
//! be shared across threads.
//!
//! # Example
//! ```
//! use faer::Mat;
//! use nystrom::{FnKernel, Nystrom, NystromOptions, PointSet};
//! use rand::SeedableRng;
//!
//! let domain: PointSet<f64> = (0..100).map(|i| i as f64 / 100.0).collect();
//! let kernel = FnKernel::new(1, |x: &f64, y: &f64| {
//!     Mat::from_fn(1, 1, |_, _| (-(x - y) * (x - y) / 0.05).exp())
//! });
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let approx = Nystrom::new(&domain, &kernel, &NystromOptions::new(3, 40), &mut rng).unwrap();
//! let phi = approx.evaluate(&0.5).unwrap();
//! assert_eq!((phi.nrows(), phi.ncols()), (1, 3));
//! ```

pub mod extension;
pub use extension::{NystromExtension, build_extension};

use crate::config::NystromOptions;
use crate::core::traits::{Domain, MatrixValuedKernel, Representer};
use crate::eigen::{Eigensolver, RandomizedEigensolver};
use crate::error::NystromError;
use crate::matrix::dense::{kernel_row_block, matmul};
use crate::matrix::gram::build_gram;
use crate::sampling::sample_landmarks;
use faer::Mat;
use rand::Rng;

/// Low-rank eigenfunction approximation of a kernel over a representer's domain.
///
/// Borrows the representer and the kernel for its whole lifetime.
pub struct Nystrom<'a, R, K>
where
    R: Representer,
    K: MatrixValuedKernel<R::Point>,
{
    representer: &'a R,
    kernel: &'a K,
    landmarks: Vec<R::Point>,
    extension: Mat<K::Scalar>,
    eigenvalues: Vec<K::Scalar>,
    num_eigenfunctions: usize,
    domain_size: usize,
}

impl<'a, R, K> Nystrom<'a, R, K>
where
    R: Representer,
    K: MatrixValuedKernel<R::Point>,
{
    /// Build the approximation with the default randomized eigensolver.
    pub fn new<G>(
        representer: &'a R,
        kernel: &'a K,
        options: &NystromOptions,
        rng: &mut G,
    ) -> Result<Self, NystromError>
    where
        G: Rng + ?Sized,
    {
        Self::with_solver(
            representer,
            kernel,
            options,
            &RandomizedEigensolver::default(),
            rng,
        )
    }

    /// Build the approximation with a caller-supplied eigensolver.
    ///
    /// `rng` is only used to draw the landmarks.
    ///
    /// # Errors
    /// * `InvalidParameter` for invalid options or a zero-dimensional kernel
    /// * `NoLandmarks` if no landmark can be drawn
    /// * `RankExceeded` if `k·d > M·d`
    /// * `NumericalRank` if one of the `k` leading eigenvalues is numerically zero
    /// * kernel, domain and solver contract violations
    pub fn with_solver<S, G>(
        representer: &'a R,
        kernel: &'a K,
        options: &NystromOptions,
        solver: &S,
        rng: &mut G,
    ) -> Result<Self, NystromError>
    where
        S: Eigensolver + ?Sized,
        G: Rng + ?Sized,
    {
        options.validate()?;
        let dim = kernel.dimension();
        if dim == 0 {
            return Err(NystromError::InvalidParameter(
                "kernel dimension must be at least 1".into(),
            ));
        }
        let k = options.num_eigenfunctions;

        let domain = representer.domain();
        let domain_size = domain.num_points();
        let landmarks = sample_landmarks(domain, options.num_landmarks, rng)?;
        let m = landmarks.len();
        if m == 0 {
            return Err(NystromError::NoLandmarks {
                requested: options.num_landmarks,
            });
        }
        let rank = k * dim;
        if rank > m * dim {
            return Err(NystromError::RankExceeded {
                requested: rank,
                available: m * dim,
            });
        }
        log::debug!("nystrom: sampled {m} of {domain_size} domain points as landmarks");

        let gram = build_gram(kernel, &landmarks)?;
        log::debug!(
            "nystrom: gram matrix {}x{}, decomposing to rank {rank}",
            gram.nrows(),
            gram.ncols()
        );

        let pairs = solver.decompose(&gram, rank)?;
        pairs.validate(gram.nrows(), rank)?;
        log::debug!(
            "nystrom: leading eigenvalue {:.3e}, eigenvalue {} is {:.3e}",
            pairs.values[0],
            k - 1,
            pairs.values[k - 1]
        );

        let ext = build_extension::<K::Scalar>(
            &pairs,
            k,
            m,
            domain_size,
            options.eigenvalue_tolerance,
        )?;
        log::info!("nystrom: approximated {k} eigenfunctions from {m} landmarks (d = {dim})");

        Ok(Self {
            representer,
            kernel,
            landmarks,
            extension: ext.matrix,
            eigenvalues: ext.eigenvalues,
            num_eigenfunctions: k,
            domain_size,
        })
    }

    /// Values of all eigenfunctions at `point`, as a `d × k` matrix.
    ///
    /// Column `j` is the `d`-dimensional value of eigenfunction `j`.
    pub fn evaluate(&self, point: &R::Point) -> Result<Mat<K::Scalar>, NystromError> {
        let row = kernel_row_block(self.kernel, point, &self.landmarks)?;
        Ok(matmul(&row, &self.extension))
    }

    /// Evaluate the eigenfunctions at many points.
    ///
    /// Runs in parallel when the `rayon` feature is enabled.
    pub fn evaluate_batch(&self, points: &[R::Point]) -> Result<Vec<Mat<K::Scalar>>, NystromError>
    where
        R: Sync,
        K: Sync,
        R::Point: Send + Sync,
    {
        #[cfg(feature = "rayon")]
        {
            use rayon::prelude::*;
            points.par_iter().map(|p| self.evaluate(p)).collect()
        }
        #[cfg(not(feature = "rayon"))]
        {
            points.iter().map(|p| self.evaluate(p)).collect()
        }
    }

    /// Renormalized eigenvalues (length `k`), non-increasing.
    pub fn eigenvalues(&self) -> &[K::Scalar] {
        &self.eigenvalues
    }

    /// Landmarks in gram-matrix order.
    pub fn landmarks(&self) -> &[R::Point] {
        &self.landmarks
    }

    pub fn num_landmarks(&self) -> usize {
        self.landmarks.len()
    }

    pub fn num_eigenfunctions(&self) -> usize {
        self.num_eigenfunctions
    }

    pub fn kernel_dimension(&self) -> usize {
        self.kernel.dimension()
    }

    /// Number of points in the domain at construction time.
    pub fn domain_size(&self) -> usize {
        self.domain_size
    }

    /// The `(M·d) × k` point-independent extension matrix.
    pub fn extension_matrix(&self) -> &Mat<K::Scalar> {
        &self.extension
    }

    pub fn representer(&self) -> &'a R {
        self.representer
    }

    pub fn kernel(&self) -> &'a K {
        self.kernel
    }
}
