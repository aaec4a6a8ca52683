use thiserror::Error;

// Unified error type for nystrom

#[derive(Error, Debug)]
pub enum NystromError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("no landmarks available (requested {requested}, domain is empty or request was 0)")]
    NoLandmarks { requested: usize },
    #[error("requested rank {requested} exceeds the gram matrix size {available}")]
    RankExceeded { requested: usize, available: usize },
    #[error("eigenvalue {index} is {value:e}, at or below threshold {threshold:e}; too many eigenfunctions for the sampled gram matrix")]
    NumericalRank {
        index: usize,
        value: f64,
        threshold: f64,
    },
    #[error("kernel returned a {rows}x{cols} block, expected {expected}x{expected}")]
    KernelShape {
        expected: usize,
        rows: usize,
        cols: usize,
    },
    #[error("kernel block k(x, x) is not symmetric at landmark {landmark}")]
    AsymmetricKernel { landmark: usize },
    #[error("kernel produced a non-finite entry at gram position ({row}, {col})")]
    NonFiniteKernel { row: usize, col: usize },
    #[error("domain reported {expected} points but listed {actual}")]
    DomainMismatch { expected: usize, actual: usize },
    #[error("decomposition error: {0}")]
    Decomposition(String),
}
