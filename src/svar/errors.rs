//! svar::errors — failures of sign-restricted identification.
//!
//! [`SvarError`] covers malformed restrictions or options, inconsistent
//! response tensors, and the one runtime outcome that is an error rather
//! than data: a draw budget that produced no accepted rotation.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyRuntimeError, exceptions::PyValueError};

pub type SvarResult<T> = Result<T, SvarError>;

/// Unified error type for sign-restricted identification.
#[derive(Debug, Clone, PartialEq)]
pub enum SvarError {
    // ---- Inputs ----
    /// Response tensor is empty or not `(H + 1) × k × k`.
    InvalidResponseShape { shape: (usize, usize, usize) },

    /// A restriction names a variable or shock outside 0..k.
    InvalidRestriction { variable: usize, shock: usize, n_vars: usize },

    /// More horizons are checked than the tensor holds.
    InvalidCheckHorizons { check_horizons: usize, available: usize },

    /// A sign code other than +1 / −1.
    InvalidSign { code: i64 },

    // ---- Options ----
    /// Percentile bounds must satisfy 0 ≤ lower < upper ≤ 100.
    InvalidPercentiles { lower: f64, upper: f64 },

    /// Batch size must be at least 1.
    InvalidBatchSize,

    // ---- Sampling ----
    /// The draw budget was spent without a single accepted rotation.
    NoAcceptedDraws { attempts: usize },
}

impl std::error::Error for SvarError {}

impl std::fmt::Display for SvarError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Inputs ----
            SvarError::InvalidResponseShape { shape } => write!(
                f,
                "SVAR Error: response tensor must be non-empty and (H+1, k, k); got {shape:?}"
            ),
            SvarError::InvalidRestriction { variable, shock, n_vars } => write!(
                f,
                "SVAR Error: restriction on (variable {variable}, shock {shock}) is out of range \
                 for {n_vars} variables"
            ),
            SvarError::InvalidCheckHorizons { check_horizons, available } => write!(
                f,
                "SVAR Error: cannot check {check_horizons} horizons; response tensor has {available}"
            ),
            SvarError::InvalidSign { code } => {
                write!(f, "SVAR Error: invalid sign code {code}; expected +1 or -1")
            }

            // ---- Options ----
            SvarError::InvalidPercentiles { lower, upper } => write!(
                f,
                "SVAR Error: percentile bounds ({lower}, {upper}) must satisfy 0 <= lower < upper <= 100"
            ),
            SvarError::InvalidBatchSize => write!(f, "SVAR Error: batch size must be at least 1"),

            // ---- Sampling ----
            SvarError::NoAcceptedDraws { attempts } => write!(
                f,
                "SVAR Error: no accepted draws after {attempts} attempts; relax the sign \
                 restrictions or raise the draw budget"
            ),
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<SvarError> for PyErr {
    fn from(err: SvarError) -> PyErr {
        match err {
            SvarError::NoAcceptedDraws { .. } => PyRuntimeError::new_err(err.to_string()),
            other => PyValueError::new_err(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // The exhausted-budget message must report the attempt count.
    //
    // Given
    // -----
    // - `NoAcceptedDraws { attempts: 20000 }`.
    //
    // Expect
    // ------
    // - "20000" appears in the message.
    fn no_accepted_draws_reports_attempts() {
        let msg = SvarError::NoAcceptedDraws { attempts: 20000 }.to_string();
        assert!(msg.contains("20000"), "{msg}");
    }
}
