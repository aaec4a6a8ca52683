pub mod options;

pub use options::{DEFAULT_EIGENVALUE_TOLERANCE, NystromOptions, RandomizedOptions};
