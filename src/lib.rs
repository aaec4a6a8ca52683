//! nystrom: low-rank eigenfunctions of matrix-valued kernels over Faer
//!
//! This crate approximates the leading eigenfunctions and eigenvalues of a
//! symmetric positive semi-definite, matrix-valued kernel operator over a
//! (possibly very large) point domain. It samples landmarks, decomposes their
//! block gram matrix with a pluggable truncated eigensolver, and extends the
//! result to arbitrary points with the Nyström formula.

pub mod config;
pub mod core;
pub mod eigen;
pub mod error;
pub mod kernel;
pub mod matrix;
pub mod nystrom;
pub mod sampling;

// Re-exports for convenience
pub use self::config::*;
pub use self::core::*;
pub use eigen::{EigenPairs, Eigensolver, ExactEigensolver, RandomizedEigensolver};
pub use error::*;
pub use kernel::*;
pub use matrix::*;
pub use nystrom::{Nystrom, NystromExtension, build_extension};
pub use sampling::sample_landmarks;
