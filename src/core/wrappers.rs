//! Ready-made collaborators for the core traits.
//!
//! - [`PointSet`] is an in-memory domain that doubles as its own representer.
//! - [`FnKernel`] turns a closure returning a `d×d` block into a [`MatrixValuedKernel`].
//! - References and boxes of kernels are kernels themselves, so callers can
//!   keep ownership and hand out `&K` or `Box<dyn ...>`.

use crate::core::traits::{Domain, MatrixValuedKernel, Representer, Scalar};
use faer::Mat;
use std::marker::PhantomData;

/// A domain backed by a plain vector of points.
#[derive(Clone, Debug, PartialEq)]
pub struct PointSet<P> {
    points: Vec<P>,
}

impl<P: Clone> PointSet<P> {
    pub fn new(points: Vec<P>) -> Self {
        Self { points }
    }

    /// Borrow the points without cloning them.
    pub fn as_slice(&self) -> &[P] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl<P: Clone> From<Vec<P>> for PointSet<P> {
    fn from(points: Vec<P>) -> Self {
        Self::new(points)
    }
}

impl<P: Clone> FromIterator<P> for PointSet<P> {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<P: Clone> Domain for PointSet<P> {
    type Point = P;

    fn num_points(&self) -> usize {
        self.points.len()
    }

    fn points(&self) -> Vec<P> {
        self.points.clone()
    }
}

impl<P: Clone> Representer for PointSet<P> {
    type Point = P;
    type Domain = Self;

    fn domain(&self) -> &Self {
        self
    }
}

/// Kernel built from a closure `f(x, y) -> Mat<T>` of fixed dimension.
pub struct FnKernel<P, T, F> {
    dim: usize,
    f: F,
    _marker: PhantomData<fn(&P, &P) -> T>,
}

impl<P, T, F> FnKernel<P, T, F>
where
    T: Scalar,
    F: Fn(&P, &P) -> Mat<T>,
{
    pub fn new(dim: usize, f: F) -> Self {
        Self {
            dim,
            f,
            _marker: PhantomData,
        }
    }
}

impl<P, T, F> MatrixValuedKernel<P> for FnKernel<P, T, F>
where
    T: Scalar,
    F: Fn(&P, &P) -> Mat<T>,
{
    type Scalar = T;

    fn dimension(&self) -> usize {
        self.dim
    }

    fn evaluate(&self, x: &P, y: &P) -> Mat<T> {
        (self.f)(x, y)
    }
}

impl<P, K: MatrixValuedKernel<P> + ?Sized> MatrixValuedKernel<P> for &K {
    type Scalar = K::Scalar;

    fn dimension(&self) -> usize {
        (**self).dimension()
    }

    fn evaluate(&self, x: &P, y: &P) -> Mat<K::Scalar> {
        (**self).evaluate(x, y)
    }
}

impl<P, K: MatrixValuedKernel<P> + ?Sized> MatrixValuedKernel<P> for Box<K> {
    type Scalar = K::Scalar;

    fn dimension(&self) -> usize {
        (**self).dimension()
    }

    fn evaluate(&self, x: &P, y: &P) -> Mat<K::Scalar> {
        (**self).evaluate(x, y)
    }
}
