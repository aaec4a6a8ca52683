//! Collaborator traits and the adapters that implement them.

pub mod traits;
pub mod wrappers;

pub use traits::{Domain, MatrixValuedKernel, Representer, Scalar, ScalarKernel};
pub use wrappers::{FnKernel, PointSet};
