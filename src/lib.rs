pub mod operand;
pub mod shared;
pub mod validation;
pub mod vector;

use thiserror::Error;

/// Why a coefficient sequence was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoefficientsFault {
    #[error("coefficients must be an array")]
    NotASequence,
    #[error("all the coefficients must be numbers (first offending index {index})")]
    NonNumeric { index: usize },
    #[error("coefficients must not be empty")]
    Empty,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum VectorError {
    #[error("Invalid Coefficients: {0}")]
    InvalidCoefficients(CoefficientsFault),
    #[error("Invalid Label: label must be a non-empty string")]
    InvalidLabel,
    #[error("Missing Coefficients: operand must have coefficients")]
    MissingCoefficients,
    #[error(
        "Dimension Mismatch: vectors must have the same dimensions to have a dot product (expected {expected}, found {found})"
    )]
    DimensionMismatch { expected: usize, found: usize },
}

impl From<CoefficientsFault> for VectorError {
    fn from(fault: CoefficientsFault) -> Self {
        VectorError::InvalidCoefficients(fault)
    }
}

pub type Result<T> = std::result::Result<T, VectorError>;

// Re-export main types for convenience
pub use operand::{Coefficients, Normed};
pub use shared::SharedVector;
pub use vector::Vector;
