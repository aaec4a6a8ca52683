//! Matrix module: dense helpers and block gram assembly.

pub mod dense;
pub mod gram;

pub use dense::{cast_mat, cast_vec, kernel_row_block};
pub use gram::{build_gram, gram_block};
