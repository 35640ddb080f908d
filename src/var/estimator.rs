//! var::estimator — reduced-form VAR(p) estimation by multivariate OLS.
//!
//! Purpose
//! -------
//! Fit
//!
//! ```text
//! yₜ = c + A₁ yₜ₋₁ + … + Aₚ yₜ₋ₚ + uₜ,     t = p,…,n−1,
//! ```
//!
//! to an `n × k` stationary series and expose everything downstream engines
//! consume: lag matrices, intercept, residuals, residual covariance, the
//! companion form, and information criteria.
//!
//! Key behaviors
//! -------------
//! - Stack the regressors Zₜ = [1, yₜ₋₁ᵀ, …, yₜ₋ₚᵀ] and solve all k
//!   equations jointly by SVD least squares (equivalent to equation-by-
//!   equation OLS, since every equation shares the same regressors).
//! - Residual covariance Σᵤ = ÛᵀÛ / (nobs − kp − 1); the MLE covariance
//!   ÛᵀÛ / nobs feeds AIC, BIC, HQIC, and FPE.
//! - Stability is judged on the companion matrix (`linalg::companion`).
//!
//! Invariants & assumptions
//! ------------------------
//! - `nobs = n − p` must satisfy `nobs ≥ k·p + 2` so that the residual
//!   covariance has at least one degree of freedom.
//! - A [`FittedVar`] is immutable once built and fully determined by
//!   (series, p): no randomness, repeatable output.
//!
//! Conventions
//! -----------
//! - `coefs()[ℓ − 1][[i, j]]` is the effect of variable j at lag ℓ on
//!   equation i.
//! - Residual rows align with observations p,…,n−1 of the input.
use crate::linalg::{companion_matrix, eigenvalue_moduli, is_stable, least_squares};
use crate::statistical_tests::{LBResult, min_p_value_over_columns};
use crate::var::errors::{VarError, VarResult};
use ndarray::{Array1, Array2, Array3, ArrayView2, s};
use tracing::debug;

/// InfoCriteria — information criteria of a fitted VAR.
///
/// Fields
/// ------
/// - `aic`, `bic`, `hqic`: log-determinant of the MLE residual covariance
///   plus the respective penalty on `p·k²` slope parameters.
/// - `fpe`: final prediction error, `((n + kp + 1)/(n − kp − 1))ᵏ · |Σ̃|`.
///
/// All four are NaN when the MLE covariance is not positive definite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InfoCriteria {
    pub aic: f64,
    pub bic: f64,
    pub hqic: f64,
    pub fpe: f64,
}

/// ModelSummary — compact description of a fitted VAR for reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSummary {
    /// Lag order p.
    pub lag_order: usize,
    /// Effective sample size n − p.
    pub nobs: usize,
    /// Number of equations k.
    pub neqs: usize,
    /// Information criteria.
    pub criteria: InfoCriteria,
    /// Residual matrix shape `(nobs, neqs)`.
    pub resid_shape: (usize, usize),
    /// Companion stability verdict.
    pub stable: bool,
}

impl std::fmt::Display for ModelSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "VAR({}) | nobs: {} | neqs: {}", self.lag_order, self.nobs, self.neqs)?;
        writeln!(
            f,
            "AIC: {:.6} | BIC: {:.6} | HQIC: {:.6} | FPE: {:.6e}",
            self.criteria.aic, self.criteria.bic, self.criteria.hqic, self.criteria.fpe
        )?;
        write!(f, "Residuals shape: {:?} | Stable: {}", self.resid_shape, self.stable)
    }
}

/// FittedVar — an estimated reduced-form VAR(p).
///
/// Purpose
/// -------
/// Own the outputs of [`FittedVar::fit`] and serve them read-only to the
/// lag selector, the IRF/FEVD engine, and reporting.
///
/// Fields
/// ------
/// - `lag_order`: p ≥ 1.
/// - `intercept`: `Array1<f64>` of length k.
/// - `coefs`: p matrices, each `k × k`.
/// - `residuals`: `(n − p) × k`.
/// - `sigma_u`: degrees-of-freedom adjusted residual covariance, `k × k`.
/// - `sigma_u_mle`: ÛᵀÛ / nobs, `k × k`.
/// - `companion`: `kp × kp`.
/// - `criteria`: [`InfoCriteria`].
///
/// Invariants
/// ----------
/// - `sigma_u` is symmetric by construction.
/// - `companion` is rebuilt from `coefs` and never modified.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedVar {
    lag_order: usize,
    intercept: Array1<f64>,
    coefs: Vec<Array2<f64>>,
    residuals: Array2<f64>,
    sigma_u: Array2<f64>,
    sigma_u_mle: Array2<f64>,
    companion: Array2<f64>,
    criteria: InfoCriteria,
}

impl FittedVar {
    /// Fit a VAR(`lag_order`) with intercept to `series`.
    ///
    /// Parameters
    /// ----------
    /// - `series`: `ArrayView2<f64>`
    ///   `n × k` matrix, rows = time, columns = variables. Column order
    ///   fixes variable order in every output.
    /// - `lag_order`: `usize`
    ///   p ≥ 1.
    ///
    /// Returns
    /// -------
    /// `VarResult<FittedVar>`
    ///
    /// Errors
    /// ------
    /// - `VarError::InvalidLagOrder` if p = 0.
    /// - `VarError::NoVariables` if k = 0.
    /// - `VarError::InsufficientData` if `n − p ≤ k·p + 1`.
    /// - `VarError::NonFiniteData` for the first NaN/±∞ entry.
    /// - `VarError::DegenerateRegressors` if the least-squares solve fails.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// use ndarray::Array2;
    /// use rust_svar::var::FittedVar;
    ///
    /// // Deterministic but non-degenerate two-variable series.
    /// let series = Array2::from_shape_fn((60, 2), |(t, j)| {
    ///     ((t * (j + 3)) as f64 * 0.7).sin() + 0.1 * j as f64
    /// });
    /// let model = FittedVar::fit(series.view(), 2).unwrap();
    ///
    /// assert_eq!(model.coefs().len(), 2);
    /// assert_eq!(model.residuals().dim(), (58, 2));
    /// assert_eq!(model.companion().dim(), (4, 4));
    /// ```
    pub fn fit(series: ArrayView2<'_, f64>, lag_order: usize) -> VarResult<Self> {
        let (rows, k) = series.dim();
        if lag_order == 0 {
            return Err(VarError::InvalidLagOrder { lag_order });
        }
        if k == 0 {
            return Err(VarError::NoVariables);
        }
        let nobs = rows.saturating_sub(lag_order);
        let required = k * lag_order + 2;
        if nobs < required {
            return Err(VarError::InsufficientData { nobs, lag_order, n_vars: k, required });
        }
        if let Some(((row, col), _)) = series.indexed_iter().find(|(_, v)| !v.is_finite()) {
            return Err(VarError::NonFiniteData { row, col });
        }

        let z = build_regressors(series, lag_order);
        let y = series.slice(s![lag_order.., ..]);
        let b = least_squares(z.view(), y)
            .ok_or(VarError::DegenerateRegressors { lag_order })?;

        let intercept = b.row(0).to_owned();
        let coefs: Vec<Array2<f64>> = (0..lag_order)
            .map(|lag| Array2::from_shape_fn((k, k), |(i, j)| b[[1 + lag * k + j, i]]))
            .collect();

        let residuals = &y - &z.dot(&b);
        let sse = residuals.t().dot(&residuals);
        let df_resid = (nobs - (k * lag_order + 1)) as f64;
        let sigma_u = symmetrize(&sse / df_resid);
        let sigma_u_mle = symmetrize(&sse / nobs as f64);
        let companion = companion_matrix(&coefs);
        let criteria = info_criteria(&sigma_u_mle, nobs, k, lag_order);

        debug!(lag_order, nobs, n_vars = k, aic = criteria.aic, "fitted reduced-form VAR");

        Ok(FittedVar {
            lag_order,
            intercept,
            coefs,
            residuals,
            sigma_u,
            sigma_u_mle,
            companion,
            criteria,
        })
    }

    /// Lag order p.
    pub fn lag_order(&self) -> usize {
        self.lag_order
    }

    /// Number of variables / equations k.
    pub fn n_vars(&self) -> usize {
        self.intercept.len()
    }

    /// Effective sample size n − p.
    pub fn nobs(&self) -> usize {
        self.residuals.nrows()
    }

    pub fn intercept(&self) -> &Array1<f64> {
        &self.intercept
    }

    /// Lag matrices A₁,…,Aₚ.
    pub fn coefs(&self) -> &[Array2<f64>] {
        &self.coefs
    }

    /// Lag matrices stacked as a `p × k × k` tensor.
    pub fn coefs_tensor(&self) -> Array3<f64> {
        let k = self.n_vars();
        Array3::from_shape_fn((self.lag_order, k, k), |(l, i, j)| self.coefs[l][[i, j]])
    }

    pub fn residuals(&self) -> &Array2<f64> {
        &self.residuals
    }

    /// Degrees-of-freedom adjusted residual covariance Σᵤ.
    pub fn sigma_u(&self) -> &Array2<f64> {
        &self.sigma_u
    }

    /// Maximum-likelihood residual covariance ÛᵀÛ / nobs.
    pub fn sigma_u_mle(&self) -> &Array2<f64> {
        &self.sigma_u_mle
    }

    pub fn companion(&self) -> &Array2<f64> {
        &self.companion
    }

    pub fn criteria(&self) -> InfoCriteria {
        self.criteria
    }

    /// Moduli of the companion eigenvalues (`None` if the solver fails).
    pub fn eigenvalue_moduli(&self) -> Option<Vec<f64>> {
        eigenvalue_moduli(self.companion.view())
    }

    /// True iff every companion eigenvalue lies strictly inside the unit circle.
    pub fn is_stable(&self) -> bool {
        is_stable(self.companion.view())
    }

    /// Minimum Ljung–Box p-value over equations and lags 1..=`lags`.
    pub fn whiteness(&self, lags: usize) -> LBResult<f64> {
        min_p_value_over_columns(self.residuals.view(), lags)
    }

    /// Reporting summary of the fit.
    pub fn summary(&self) -> ModelSummary {
        ModelSummary {
            lag_order: self.lag_order,
            nobs: self.nobs(),
            neqs: self.n_vars(),
            criteria: self.criteria,
            resid_shape: self.residuals.dim(),
            stable: self.is_stable(),
        }
    }
}

//
// ---------- Private helpers ----------
//

/// Regressor matrix with rows [1, yₜ₋₁ᵀ, …, yₜ₋ₚᵀ] for t = p,…,n−1.
fn build_regressors(series: ArrayView2<'_, f64>, p: usize) -> Array2<f64> {
    let (rows, k) = series.dim();
    Array2::from_shape_fn((rows - p, 1 + k * p), |(t, c)| {
        if c == 0 {
            1.0
        } else {
            let lag = (c - 1) / k + 1;
            let var = (c - 1) % k;
            series[[t + p - lag, var]]
        }
    })
}

#[inline]
fn symmetrize(m: Array2<f64>) -> Array2<f64> {
    (&m + &m.t()) * 0.5
}

/// AIC, BIC, HQIC, and FPE from the MLE residual covariance.
fn info_criteria(sigma_mle: &Array2<f64>, nobs: usize, k: usize, p: usize) -> InfoCriteria {
    let n = nobs as f64;
    let free_params = (p * k * k) as f64;
    let df_model = (k * p + 1) as f64;
    let df_resid = n - df_model;

    let log_det = match crate::linalg::lower_cholesky(sigma_mle.view()) {
        Some(l) => 2.0 * l.diag().iter().map(|d| d.ln()).sum::<f64>(),
        None => f64::NAN,
    };

    InfoCriteria {
        aic: log_det + 2.0 / n * free_params,
        bic: log_det + n.ln() / n * free_params,
        hqic: log_det + 2.0 * n.ln().ln() / n * free_params,
        fpe: ((n + df_model) / df_resid).powi(k as i32) * log_det.exp(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::var::simulate::{SimulationOptions, simulate_var};
    use approx::assert_abs_diff_eq;
    use ndarray::{Axis, array};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Coefficient recovery on a long simulated VAR(1).
    // - The degrees-of-freedom guard (`InsufficientData`) at its boundary.
    // - Shapes of residuals and companion form, residual centring, and
    //   agreement of `is_stable` with the eigenvalue moduli.
    // - Determinism of repeated fits.
    //
    // They intentionally DO NOT cover asymptotic distribution of the
    // estimator.
    // -------------------------------------------------------------------------

    fn simulated_var1(nobs: usize, seed: u64) -> Array2<f64> {
        let a1 = array![[0.5, 0.1], [-0.2, 0.3]];
        let intercept = array![0.1, -0.05];
        let chol = array![[1.0, 0.0], [0.3, 0.8]];
        let opts = SimulationOptions::new(nobs, 200, Some(seed));
        simulate_var(&[a1], intercept.view(), chol.view(), &opts).expect("valid DGP")
    }

    #[test]
    // Purpose
    // -------
    // Check that OLS recovers the lag matrix of a long stable VAR(1).
    //
    // Given
    // -----
    // - 5 000 observations from A₁ = [[0.5, 0.1], [−0.2, 0.3]].
    //
    // Expect
    // ------
    // - Every estimated entry within 0.05 of the truth.
    fn fit_recovers_var1_coefficients() {
        // Arrange
        let series = simulated_var1(5_000, 1);

        // Act
        let model = FittedVar::fit(series.view(), 1).expect("fit succeeds");

        // Assert
        let truth = array![[0.5, 0.1], [-0.2, 0.3]];
        for (est, tru) in model.coefs()[0].iter().zip(truth.iter()) {
            assert_abs_diff_eq!(est, tru, epsilon = 0.05);
        }
    }

    #[test]
    // Purpose
    // -------
    // Exercise the degrees-of-freedom guard on both sides of the boundary.
    //
    // Given
    // -----
    // - k = 2, p = 3, so at least k·p + 2 = 8 effective observations are
    //   needed (n − p ≤ k·p + 1 fails).
    //
    // Expect
    // ------
    // - 10 rows (nobs 7) → `InsufficientData`; 11 rows (nobs 8) → Ok.
    fn fit_enforces_minimum_sample_size() {
        // Arrange
        let series = simulated_var1(11, 2);

        // Act
        let short = FittedVar::fit(series.slice(s![..10, ..]), 3);
        let ok = FittedVar::fit(series.view(), 3);

        // Assert
        assert_eq!(
            short,
            Err(VarError::InsufficientData { nobs: 7, lag_order: 3, n_vars: 2, required: 8 })
        );
        assert!(ok.is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Reject p = 0 and non-finite inputs.
    //
    // Given
    // -----
    // - A valid series and a copy with a NaN.
    //
    // Expect
    // ------
    // - `InvalidLagOrder` and `NonFiniteData` respectively.
    fn fit_rejects_zero_lag_and_non_finite_data() {
        // Arrange
        let series = simulated_var1(50, 3);
        let mut bad = series.clone();
        bad[[7, 1]] = f64::NAN;

        // Act & Assert
        assert_eq!(FittedVar::fit(series.view(), 0), Err(VarError::InvalidLagOrder { lag_order: 0 }));
        assert_eq!(FittedVar::fit(bad.view(), 1), Err(VarError::NonFiniteData { row: 7, col: 1 }));
    }

    #[test]
    // Purpose
    // -------
    // Verify output shapes, residual centring (intercept included), and
    // agreement between `is_stable` and the eigenvalue moduli.
    //
    // Given
    // -----
    // - 300 observations, p = 3.
    //
    // Expect
    // ------
    // - Residuals (297, 2), companion (6, 6), coefficient tensor (3, 2, 2).
    // - Column means of residuals ≈ 0.
    // - `is_stable() == moduli.all(< 1)`.
    fn fit_shapes_centring_and_stability_are_consistent() {
        // Arrange
        let series = simulated_var1(300, 4);

        // Act
        let model = FittedVar::fit(series.view(), 3).expect("fit succeeds");

        // Assert
        assert_eq!(model.residuals().dim(), (297, 2));
        assert_eq!(model.companion().dim(), (6, 6));
        assert_eq!(model.coefs_tensor().dim(), (3, 2, 2));
        let means = model.residuals().mean_axis(Axis(0)).expect("non-empty");
        for m in means.iter() {
            assert_abs_diff_eq!(*m, 0.0, epsilon = 1e-10);
        }
        let moduli = model.eigenvalue_moduli().expect("converges");
        assert_eq!(moduli.len(), 6);
        assert_eq!(model.is_stable(), moduli.iter().all(|&m| m < 1.0));
        assert!(model.is_stable());
    }

    #[test]
    // Purpose
    // -------
    // Estimation is deterministic and the summary reflects the fit.
    //
    // Given
    // -----
    // - The same series fitted twice at p = 2.
    //
    // Expect
    // ------
    // - Identical models; summary fields match accessors; Σᵤ symmetric;
    //   BIC penalizes more than AIC for nobs > e².
    fn fit_is_deterministic_and_summary_matches() {
        // Arrange
        let series = simulated_var1(200, 5);

        // Act
        let a = FittedVar::fit(series.view(), 2).unwrap();
        let b = FittedVar::fit(series.view(), 2).unwrap();
        let summary = a.summary();

        // Assert
        assert_eq!(a, b);
        assert_eq!(summary.lag_order, 2);
        assert_eq!(summary.nobs, 198);
        assert_eq!(summary.neqs, 2);
        assert_eq!(summary.resid_shape, (198, 2));
        assert_eq!(a.sigma_u()[[0, 1]], a.sigma_u()[[1, 0]]);
        assert!(summary.criteria.bic > summary.criteria.aic);
        assert!(summary.to_string().contains("VAR(2)"));
    }
}
