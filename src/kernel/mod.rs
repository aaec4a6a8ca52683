//! Kernel functions usable with the Nyström approximation.

pub mod gaussian;
pub mod matrix_valued;

pub use self::gaussian::GaussianKernel;
pub use self::matrix_valued::{ScaledKernel, UncorrelatedMatrixValuedKernel};
