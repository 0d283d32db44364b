//! Calculation errors.

use thiserror::Error;
use vd_core::CoreError;

/// Result type for calculation operations.
pub type CalcResult<T> = Result<T, CalcError>;

/// Errors that can occur while evaluating a circuit.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    /// Malformed or out-of-range numeric field.
    #[error("Invalid input: {what}")]
    InvalidInput { what: &'static str },

    /// Conductor size absent from the catalog.
    #[error("Unknown conductor size: {size}")]
    UnknownConductorSize { size: String },
}

impl From<CoreError> for CalcError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NonFinite { what, .. } => CalcError::InvalidInput { what },
            CoreError::InvalidArg { what } => CalcError::InvalidInput { what },
            CoreError::Invariant { what } => CalcError::InvalidInput { what },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = CalcError::UnknownConductorSize {
            size: "13 AWG".into(),
        };
        assert!(err.to_string().contains("13 AWG"));
    }

    #[test]
    fn core_error_maps_to_invalid_input() {
        let core = CoreError::NonFinite {
            what: "load current",
            value: f64::NAN,
        };
        let calc: CalcError = core.into();
        assert!(matches!(calc, CalcError::InvalidInput { .. }));
    }
}
