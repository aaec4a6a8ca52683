//! Core collaborator traits for nystrom.
//!
//! The approximation never owns its domain or kernel. Both are consumed
//! through the narrow capability traits below, so any point type and any
//! kernel (struct, closure, composed kernel) can be plugged in.

use faer::Mat;
use faer::traits::RealField;
use num_traits::{Float, FromPrimitive};

/// Working scalar for eigenfunction values and eigenvalues.
///
/// The gram matrix and its decomposition are always carried out in `f64`;
/// results are cast down to `Self` afterwards.
pub trait Scalar: RealField + Float + FromPrimitive + Send + Sync + 'static {}

impl Scalar for f32 {}
impl Scalar for f64 {}

/// An ordered, finite set of points.
pub trait Domain {
    /// Point type of the domain.
    type Point: Clone;
    /// Number of points in the domain.
    fn num_points(&self) -> usize;
    /// Materialize the list of domain points, in domain order.
    fn points(&self) -> Vec<Self::Point>;
}

/// Anything that can hand out the domain it is defined on.
pub trait Representer {
    type Point: Clone;
    type Domain: Domain<Point = Self::Point>;
    /// The domain of the represented object.
    fn domain(&self) -> &Self::Domain;
}

/// Matrix-valued kernel k: P × P → R^{d×d}.
///
/// Implementations must satisfy `k(x, y) == k(y, x)ᵀ` and return a `d×d`
/// matrix for every pair of points.
pub trait MatrixValuedKernel<P> {
    type Scalar: Scalar;
    /// Output dimension `d`.
    fn dimension(&self) -> usize;
    /// Evaluate `k(x, y)`.
    fn evaluate(&self, x: &P, y: &P) -> Mat<Self::Scalar>;
}

/// Scalar-valued kernel k: P × P → R.
pub trait ScalarKernel<P> {
    fn evaluate(&self, x: &P, y: &P) -> f64;
}
