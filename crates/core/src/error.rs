//! Errors that cross the core boundary
//!
//! Lookup failures never show up here: they are absorbed by the orchestrator
//! and turned into documented defaults (land, casualties unavailable).

/// Hard failures of an impact calculation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ImpactError {
    /// A numeric input was NaN or infinite
    #[error("input '{field}' is not a finite number")]
    NonFiniteInput {
        /// Name of the offending field
        field: &'static str,
    },

    /// A numeric input violates the model's domain (e.g. non-positive diameter)
    #[error("input '{field}' = {value} is outside the valid range ({expected})")]
    InvalidInput {
        /// Name of the offending field
        field: &'static str,
        /// Value received
        value: f64,
        /// Human-readable description of the valid range
        expected: &'static str,
    },

    /// The model produced a non-finite output
    #[error("calculation failed: {0}")]
    CalculationFailed(String),
}

impl ImpactError {
    /// True for errors caused by caller data rather than the model itself
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ImpactError::NonFiniteInput { .. } | ImpactError::InvalidInput { .. }
        )
    }
}

/// Return `NonFiniteInput` unless `value` is finite
pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<f64, ImpactError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ImpactError::NonFiniteInput { field })
    }
}

/// Return `CalculationFailed` unless an output is finite
pub(crate) fn ensure_finite_output(what: &str, value: f64) -> Result<f64, ImpactError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ImpactError::CalculationFailed(format!("{what} is not finite ({value})")))
    }
}
