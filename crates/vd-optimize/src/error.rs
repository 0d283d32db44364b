//! Optimizer errors.

use thiserror::Error;
use vd_calc::CalcError;

/// Result type for optimizer operations.
pub type OptimizeResult<T> = Result<T, OptimizeError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptimizeError {
    #[error(transparent)]
    Calc(#[from] CalcError),

    /// The caller supplied nothing to compare.
    #[error("Candidate set is empty")]
    EmptyCandidates,
}
