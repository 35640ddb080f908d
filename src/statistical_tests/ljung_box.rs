//! statistical_tests::ljung_box — Ljung–Box portmanteau test for whiteness.
//!
//! Purpose
//! -------
//! Implement the Ljung–Box (1978) Q statistic and its χ² p-values for a
//! univariate series, and the multi-equation "whiteness verdict" used by
//! VAR lag selection: the minimum p-value over every residual column and
//! every test lag 1..m.
//!
//! Key behaviors
//! -------------
//! - Compute sample autocorrelations r̂ⱼ of the demeaned series with the
//!   full-sample denominator ∑ₜ (Yₜ − Ȳ)².
//! - Form Qⱼ = n(n + 2) ∑ᵢ₌₁ʲ r̂ᵢ² / (n − i) for every j = 1..m and the
//!   upper-tail χ²(j) p-value of each.
//! - Reduce a residual matrix to a single scalar via
//!   [`min_p_value_over_columns`].
//!
//! Invariants & assumptions
//! ------------------------
//! - `1 ≤ lags < n`; data finite (enforced by `validate_input`).
//! - No degrees-of-freedom adjustment for fitted parameters is applied; the
//!   p-value at lag j uses j degrees of freedom.
//!
//! Conventions
//! -----------
//! - Lag j pairs (Yₜ, Yₜ₋ⱼ) for t = j,…,n−1.
//! - Vectors in [`LBOutcome`] are indexed by `lag − 1`.
//!
//! Testing notes
//! -------------
//! - Unit tests check a closed-form alternating series, monotonicity of Qⱼ,
//!   p-value bounds, the zero-variance error, and the column reduction.
use crate::statistical_tests::errors::{LBError, LBResult};
use crate::statistical_tests::validation::validate_input;
use ndarray::ArrayView2;
use statrs::distribution::{ChiSquared, ContinuousCDF};

/// LBOutcome — Ljung–Box statistics and p-values for lags 1..m.
///
/// Purpose
/// -------
/// Hold the cumulative Ljung–Box statistics Q₁,…,Qₘ of one series together
/// with their χ² p-values.
///
/// Fields
/// ------
/// - `statistics`: `Vec<f64>`
///   Qⱼ for j = 1..m, non-decreasing in j.
/// - `p_values`: `Vec<f64>`
///   Upper-tail χ²(j) probabilities of `statistics[j − 1]`, each in [0, 1].
///
/// Invariants
/// ----------
/// - `statistics.len() == p_values.len() == lags` from the original call.
#[derive(Debug, Clone, PartialEq)]
pub struct LBOutcome {
    statistics: Vec<f64>,
    p_values: Vec<f64>,
}

impl LBOutcome {
    /// Run the Ljung–Box test on `data` for lags 1..=`lags`.
    ///
    /// Parameters
    /// ----------
    /// - `data`: `&[f64]`
    ///   Series of length n > `lags`, finite. Demeaned internally.
    /// - `lags`: `usize`
    ///   Highest lag m ≥ 1.
    ///
    /// Returns
    /// -------
    /// `LBResult<LBOutcome>`
    ///
    /// Errors
    /// ------
    /// - Any `LBError` from `validate_input`.
    /// - `LBError::ZeroVariance` when the series is constant.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// use rust_svar::statistical_tests::ljung_box::LBOutcome;
    ///
    /// let data = vec![0.3, -0.1, 0.4, -0.5, 0.2, 0.1, -0.3, 0.05];
    /// let outcome = LBOutcome::ljung_box(&data, 3).unwrap();
    ///
    /// assert_eq!(outcome.p_values().len(), 3);
    /// assert!((0.0..=1.0).contains(&outcome.min_p_value()));
    /// ```
    pub fn ljung_box(data: &[f64], lags: usize) -> LBResult<Self> {
        validate_input(data, lags)?;
        let n = data.len() as f64;
        let acf = calc_autocorrelations(data, lags)?;

        let mut statistics = Vec::with_capacity(lags);
        let mut p_values = Vec::with_capacity(lags);
        let mut q = 0.0;
        for (idx, r) in acf.iter().enumerate() {
            let j = idx + 1;
            q += r * r / (n - j as f64);
            let stat = n * (n + 2.0) * q;
            statistics.push(stat);
            p_values.push(chi_square_sf(stat, j));
        }

        Ok(LBOutcome { statistics, p_values })
    }

    /// Cumulative statistics Q₁,…,Qₘ.
    pub fn statistics(&self) -> &[f64] {
        &self.statistics
    }

    /// χ² p-values for each lag.
    pub fn p_values(&self) -> &[f64] {
        &self.p_values
    }

    /// Smallest p-value across the tested lags.
    pub fn min_p_value(&self) -> f64 {
        self.p_values.iter().copied().fold(f64::INFINITY, f64::min)
    }
}

/// min_p_value_over_columns — whiteness verdict for a residual matrix.
///
/// Purpose
/// -------
/// Apply the Ljung–Box test with `lags` lags to every column of an
/// `n × k` residual matrix and return the minimum p-value over all columns
/// and lags. Small values indicate remaining serial correlation in at least
/// one equation.
///
/// Errors
/// ------
/// - The first `LBError` produced by any column.
pub fn min_p_value_over_columns(residuals: ArrayView2<'_, f64>, lags: usize) -> LBResult<f64> {
    let mut min_p = f64::INFINITY;
    for column in residuals.columns() {
        let series: Vec<f64> = column.to_vec();
        let outcome = LBOutcome::ljung_box(&series, lags)?;
        min_p = min_p.min(outcome.min_p_value());
    }
    Ok(min_p)
}

//
// ---------- Private helpers ----------
//

/// Sample autocorrelations r̂₁,…,r̂ₘ with the full-sample denominator.
///
/// Returns `LBError::ZeroVariance` when ∑ₜ (Yₜ − Ȳ)² = 0.
fn calc_autocorrelations(data: &[f64], lags: usize) -> LBResult<Vec<f64>> {
    let n = data.len();
    let mean = data.iter().sum::<f64>() / n as f64;
    let centred: Vec<f64> = data.iter().map(|y| y - mean).collect();
    let denom: f64 = centred.iter().map(|y| y * y).sum();
    if denom <= 0.0 {
        return Err(LBError::ZeroVariance);
    }

    Ok((1..=lags)
        .map(|j| {
            centred[j..].iter().zip(&centred).map(|(y_t, y_t_min_j)| y_t * y_t_min_j).sum::<f64>()
                / denom
        })
        .collect())
}

#[inline]
fn chi_square_sf(stat: f64, dof: usize) -> f64 {
    // dof ≥ 1 by construction, so the distribution is always valid.
    match ChiSquared::new(dof as f64) {
        Ok(dist) => dist.sf(stat).clamp(0.0, 1.0),
        Err(_) => f64::NAN,
    }
}
