//! var::errors — failures of reduced-form estimation and its consumers.
//!
//! Purpose
//! -------
//! Define [`VarError`], the error type shared by the estimator, the lag
//! selector, and the impulse-response / FEVD engine, plus the
//! [`VarResult`] alias.
//!
//! Key behaviors
//! -------------
//! - Every variant carries the parameters needed to act on it (requested
//!   lag order, sample sizes, offending cell) so that callers can reduce p,
//!   supply more data, or fix the input.
//! - Diagnostics (stability, whiteness) are *not* errors; they are reported
//!   as data on each fitted candidate.
//!
//! Conventions
//! -----------
//! - `nobs` always means the effective sample after losing p initial
//!   observations to lags.
use crate::statistical_tests::errors::LBError;

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

pub type VarResult<T> = Result<T, VarError>;

/// Unified error type for VAR estimation, lag selection, and IRF/FEVD.
#[derive(Debug, Clone, PartialEq)]
pub enum VarError {
    // ---- Estimation ----
    /// Lag order must be at least 1.
    InvalidLagOrder { lag_order: usize },

    /// The series has no columns.
    NoVariables,

    /// Too few observations: the effective sample `nobs` does not exceed
    /// `lag_order · n_vars + 1`.
    InsufficientData { nobs: usize, lag_order: usize, n_vars: usize, required: usize },

    /// NaN or ±∞ in the input series.
    NonFiniteData { row: usize, col: usize },

    /// The least-squares solve failed (no usable singular values).
    DegenerateRegressors { lag_order: usize },

    /// Coefficient, intercept, or covariance shapes disagree.
    ShapeMismatch { context: &'static str },

    // ---- Lag selection ----
    /// Empty candidate range (`p_max < 1`) or a series too short for p = 1.
    NoCandidates { p_max: usize, rows: usize },

    /// Significance level outside (0, 1).
    InvalidAlpha { alpha: f64 },

    /// The whiteness test could not be configured for the residuals.
    Whiteness(LBError),

    // ---- Impulse responses ----
    /// Residual covariance is not positive definite; Cholesky
    /// orthogonalization is undefined.
    SingularCovariance { lag_order: usize },
}

impl From<LBError> for VarError {
    fn from(err: LBError) -> Self {
        VarError::Whiteness(err)
    }
}

impl std::error::Error for VarError {}

impl std::fmt::Display for VarError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Estimation ----
            VarError::InvalidLagOrder { lag_order } => {
                write!(f, "VAR Error: invalid lag order {lag_order}; must be at least 1")
            }
            VarError::NoVariables => write!(f, "VAR Error: series has no variables"),
            VarError::InsufficientData { nobs, lag_order, n_vars, required } => write!(
                f,
                "VAR Error: insufficient data for VAR({lag_order}) with {n_vars} variables: \
                 {nobs} usable observations, need at least {required}"
            ),
            VarError::NonFiniteData { row, col } => {
                write!(f, "VAR Error: non-finite observation at row {row}, column {col}")
            }
            VarError::DegenerateRegressors { lag_order } => write!(
                f,
                "VAR Error: least-squares solve failed for VAR({lag_order}); regressors are degenerate"
            ),
            VarError::ShapeMismatch { context } => {
                write!(f, "VAR Error: inconsistent shapes in {context}")
            }

            // ---- Lag selection ----
            VarError::NoCandidates { p_max, rows } => write!(
                f,
                "VAR Error: no admissible lag order in 1..={p_max} for a series of {rows} rows"
            ),
            VarError::InvalidAlpha { alpha } => {
                write!(f, "VAR Error: significance level {alpha} must lie in (0, 1)")
            }
            VarError::Whiteness(err) => write!(f, "VAR Error: whiteness test failed: {err}"),

            // ---- Impulse responses ----
            VarError::SingularCovariance { lag_order } => write!(
                f,
                "VAR Error: residual covariance of VAR({lag_order}) is not positive definite"
            ),
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<VarError> for PyErr {
    fn from(err: VarError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // The insufficient-data message must carry every number needed to act.
    //
    // Given
    // -----
    // - nobs = 10, lag_order = 3, n_vars = 4, required = 14.
    //
    // Expect
    // ------
    // - All four numbers appear in the message.
    fn insufficient_data_message_includes_context() {
        // Arrange
        let err = VarError::InsufficientData { nobs: 10, lag_order: 3, n_vars: 4, required: 14 };

        // Act
        let msg = err.to_string();

        // Assert
        for needle in ["10", "VAR(3)", "4 variables", "14"] {
            assert!(msg.contains(needle), "missing {needle:?} in {msg}");
        }
    }

    #[test]
    // Purpose
    // -------
    // Whiteness errors convert via `From` and keep the inner message.
    //
    // Given
    // -----
    // - `LBError::InvalidLags(0)`.
    //
    // Expect
    // ------
    // - `VarError::Whiteness(..)` whose message embeds the LB message.
    fn lb_error_converts_into_whiteness_variant() {
        // Arrange
        let inner = LBError::InvalidLags(0);

        // Act
        let err: VarError = inner.clone().into();

        // Assert
        assert_eq!(err, VarError::Whiteness(inner.clone()));
        assert!(err.to_string().contains(&inner.to_string()));
    }
}
