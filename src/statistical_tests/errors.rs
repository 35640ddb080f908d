//! statistical_tests::errors — error type for portmanteau diagnostics.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias shared by the Ljung–Box test and
//! its input guards, together with a conversion layer to Python exceptions
//! for PyO3-based bindings.
//!
//! Key behaviors
//! -------------
//! - Define [`LBResult`] and [`LBError`] as the canonical result and error
//!   types for residual whiteness diagnostics.
//! - Attach human-readable `Display` messages to each variant so that
//!   diagnostics and logs are meaningful without additional context.
//! - Implement `From<LBError> for PyErr` to surface failures as
//!   `ValueError` at the Python boundary.
//!
//! Invariants & assumptions
//! ------------------------
//! - Test routines validate their inputs (length, finiteness, lag count)
//!   and return [`LBResult<T>`] instead of panicking.
//! - `LBError` values are small and cheap to clone.
//!
//! Conventions
//! -----------
//! - Messages are phrased in terms of domain constraints
//!   ("1 ≤ lags < n") rather than low-level details.
//!
//! Testing notes
//! -------------
//! - Unit tests below check that each variant embeds its payload in the
//!   `Display` message.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

pub type LBResult<T> = Result<T, LBError>;

/// LBError — error conditions for the Ljung–Box portmanteau test.
///
/// Variants
/// --------
/// - `InsufficientData { n, lags }`
///   The series has `n ≤ lags` observations, so the highest requested
///   autocorrelation cannot be formed.
/// - `InvalidData(value)`
///   A data element is NaN or ±∞.
/// - `InvalidLags(lags)`
///   The number of test lags is zero.
/// - `ZeroVariance`
///   The demeaned series is identically zero, so autocorrelations are
///   undefined.
#[derive(Debug, Clone, PartialEq)]
pub enum LBError {
    //------ Input validation errors ------
    InsufficientData { n: usize, lags: usize },
    InvalidData(f64),
    InvalidLags(usize),

    //------ Degenerate series ------
    ZeroVariance,
}

impl std::error::Error for LBError {}

impl std::fmt::Display for LBError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LBError::InsufficientData { n, lags } => {
                write!(f, "Need more than {lags} observations for {lags} test lags (got {n}).")
            }
            LBError::InvalidData(value) => {
                write!(f, "Invalid data value: {value}. Must be a finite number.")
            }
            LBError::InvalidLags(lags) => {
                write!(f, "Invalid number of test lags: {lags}. Must satisfy 1 ≤ lags < n.")
            }
            LBError::ZeroVariance => {
                write!(f, "Series has zero variance; autocorrelations are undefined.")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<LBError> for PyErr {
    fn from(err: LBError) -> PyErr {
        PyValueError::new_err(format!("LBError: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover `Display` formatting and payload embedding for
    // LBError variants. The PyO3 conversion is left to Python-level tests.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that `LBError::InsufficientData` reports both the sample size
    // and the requested lag count.
    //
    // Given
    // -----
    // - An `InsufficientData` error with n = 5 and lags = 12.
    //
    // Expect
    // ------
    // - The message contains "5" and "12".
    fn lb_error_insufficient_data_includes_n_and_lags() {
        // Arrange
        let err = LBError::InsufficientData { n: 5, lags: 12 };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains('5') && msg.contains("12"), "Got: {msg}");
    }

    #[test]
    // Purpose
    // -------
    // Verify that `LBError::InvalidLags` includes the offending lag count.
    //
    // Given
    // -----
    // - An `InvalidLags(0)` error.
    //
    // Expect
    // ------
    // - The message contains "0".
    fn lb_error_invalid_lags_includes_payload() {
        // Arrange
        let err = LBError::InvalidLags(0);

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains('0'), "Got: {msg}");
    }

    #[test]
    // Purpose
    // -------
    // Ensure the degenerate-variance variant renders a non-empty message.
    //
    // Given
    // -----
    // - `LBError::ZeroVariance`.
    //
    // Expect
    // ------
    // - A non-empty `Display` string.
    fn lb_error_zero_variance_has_nonempty_display_message() {
        // Arrange
        let err = LBError::ZeroVariance;

        // Act
        let msg = err.to_string();

        // Assert
        assert!(!msg.trim().is_empty());
    }
}
