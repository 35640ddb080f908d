//! statistical_tests::validation — shared input guards for portmanteau tests.
//!
//! Purpose
//! -------
//! Centralize the preconditions of residual whiteness tests so that series
//! length, finiteness, and lag-count checks are performed once, before any
//! autocorrelation is computed.
//!
//! Invariants & assumptions
//! ------------------------
//! - The lag count must satisfy `1 ≤ lags < n`, where `n = data.len()`.
//! - All data values must be finite.
//!
//! Conventions
//! -----------
//! - Purely validation: no I/O and no allocation beyond error construction.
//! - Failures are reported via [`LBError`].

use crate::statistical_tests::errors::{LBError, LBResult};

/// Validate basic input constraints for the Ljung–Box test.
///
/// Parameters
/// ----------
/// - `data`: `&[f64]`
///   Input series (typically one equation's residuals). All values must be
///   finite.
/// - `lags`: `usize`
///   Highest autocorrelation lag entering the statistic. Must satisfy
///   `1 ≤ lags < data.len()`.
///
/// Returns
/// -------
/// `LBResult<()>`
///   `Ok(())` when all constraints hold.
///
/// Errors
/// ------
/// - `LBError::InvalidLags(0)` when `lags == 0`.
/// - `LBError::InsufficientData { n, lags }` when `n ≤ lags`.
/// - `LBError::InvalidData(value)` for the first non-finite entry.
///
/// Examples
/// --------
/// ```rust
/// # use rust_svar::statistical_tests::validation::validate_input;
/// # use rust_svar::statistical_tests::errors::LBError;
/// let data = vec![0.1_f64, -0.2, 0.3];
/// assert!(validate_input(&data, 2).is_ok());
/// assert_eq!(validate_input(&data, 0), Err(LBError::InvalidLags(0)));
/// ```
pub fn validate_input(data: &[f64], lags: usize) -> LBResult<()> {
    if lags == 0 {
        return Err(LBError::InvalidLags(lags));
    }

    if data.len() <= lags {
        return Err(LBError::InsufficientData { n: data.len(), lags });
    }

    if let Some(&value) = data.iter().find(|v| !v.is_finite()) {
        return Err(LBError::InvalidData(value));
    }

    Ok(())
}
