//! var::irf — orthogonalized impulse responses and variance decompositions.
//!
//! Purpose
//! -------
//! Turn a fitted VAR into the dynamic objects used for interpretation and
//! identification:
//!
//! - moving-average coefficients Φ₀ = I, Φₕ = ∑ₗ₌₁^{min(h,p)} Aₗ Φₕ₋ₗ,
//! - Cholesky-orthogonalized responses Θₕ = Φₕ L with Σᵤ = L Lᵀ,
//! - forecast-error variance decomposition
//!   FEVD[h][i][j] = ∑ₛ≤ₕ Θₛ[i][j]² / ∑ⱼ' ∑ₛ≤ₕ Θₛ[i][j']².
//!
//! Conventions
//! -----------
//! - Every tensor is shaped `(H + 1, k, k)` and indexed
//!   `[horizon][variable][shock]`.
//! - Shock j is the j-th Cholesky shock, so variable order fixes the
//!   recursive ordering.
//!
//! Invariants & assumptions
//! ------------------------
//! - `irf[0]` is the lower Cholesky factor of Σᵤ.
//! - Each FEVD row sums to 1 whenever its denominator is positive; a
//!   variable with zero cumulative variance gets a zero row.
use crate::linalg::lower_cholesky;
use crate::var::errors::{VarError, VarResult};
use crate::var::estimator::FittedVar;
use ndarray::{Array2, Array3, ArrayView2, ArrayView3, Axis, s};

/// IrfFevd — impulse-response and variance-decomposition tensors.
///
/// Fields
/// ------
/// - `irf`: orthogonalized responses Θ, `(H + 1) × k × k`.
/// - `fevd`: variance shares, `(H + 1) × k × k`.
/// - `moving_average`: non-orthogonalized Φ, `(H + 1) × k × k`.
#[derive(Debug, Clone, PartialEq)]
pub struct IrfFevd {
    pub irf: Array3<f64>,
    pub fevd: Array3<f64>,
    pub moving_average: Array3<f64>,
}

impl IrfFevd {
    /// Horizon H (tensors hold H + 1 slices).
    pub fn horizon(&self) -> usize {
        self.irf.len_of(Axis(0)) - 1
    }
}

/// compute_irf_fevd — orthogonalized IRF and FEVD up to `horizon`.
///
/// Parameters
/// ----------
/// - `model`: [`FittedVar`]
/// - `horizon`: `usize`
///   H ≥ 0; H = 0 yields the impact responses only.
///
/// Returns
/// -------
/// `VarResult<IrfFevd>`
///
/// Errors
/// ------
/// - `VarError::SingularCovariance` if Σᵤ is not positive definite.
///
/// Examples
/// --------
/// ```rust
/// use ndarray::array;
/// use rust_svar::var::{FittedVar, SimulationOptions, compute_irf_fevd, simulate_var};
///
/// let series = simulate_var(
///     &[array![[0.6, 0.0], [0.2, 0.3]]],
///     array![0.0, 0.0].view(),
///     array![[1.0, 0.0], [0.5, 1.0]].view(),
///     &SimulationOptions::new(120, 50, Some(3)),
/// )
/// .unwrap();
/// let model = FittedVar::fit(series.view(), 1).unwrap();
/// let out = compute_irf_fevd(&model, 10).unwrap();
///
/// assert_eq!(out.irf.dim(), (11, 2, 2));
/// let row_sum: f64 = (0..2).map(|j| out.fevd[[10, 0, j]]).sum();
/// assert!((row_sum - 1.0).abs() < 1e-9);
/// ```
pub fn compute_irf_fevd(model: &FittedVar, horizon: usize) -> VarResult<IrfFevd> {
    let chol = lower_cholesky(model.sigma_u().view())
        .ok_or(VarError::SingularCovariance { lag_order: model.lag_order() })?;
    let k = model.n_vars();

    let moving_average = propagate(model.coefs(), Array2::eye(k).view(), horizon);
    let irf = propagate(model.coefs(), chol.view(), horizon);
    let fevd = fevd_from_irf(irf.view());

    tracing::debug!(lag_order = model.lag_order(), horizon, "computed IRF and FEVD");
    Ok(IrfFevd { irf, fevd, moving_average })
}

/// propagate — run the VAR recursion Θₕ = ∑ₗ Aₗ Θₕ₋ₗ from Θ₀ = `impact`.
///
/// Returns a `(horizon + 1) × k × k` tensor. Lag matrices must be `k × k`
/// with k taken from `impact`.
pub fn propagate(coefs: &[Array2<f64>], impact: ArrayView2<'_, f64>, horizon: usize) -> Array3<f64> {
    let k = impact.nrows();
    let mut out = Array3::<f64>::zeros((horizon + 1, k, impact.ncols()));
    out.slice_mut(s![0, .., ..]).assign(&impact);
    for h in 1..=horizon {
        let mut theta_h = Array2::<f64>::zeros((k, impact.ncols()));
        for (lag, a) in coefs.iter().enumerate().take(h) {
            theta_h += &a.dot(&out.slice(s![h - lag - 1, .., ..]));
        }
        out.slice_mut(s![h, .., ..]).assign(&theta_h);
    }
    out
}

/// fevd_from_irf — cumulative squared responses normalized per variable.
///
/// Works for any `(H + 1) × k × k` response tensor, including rotated
/// structural responses.
pub fn fevd_from_irf(irf: ArrayView3<'_, f64>) -> Array3<f64> {
    let (n_h, k, n_shocks) = irf.dim();
    let mut fevd = Array3::<f64>::zeros((n_h, k, n_shocks));
    let mut cumulative = Array2::<f64>::zeros((k, n_shocks));
    for h in 0..n_h {
        cumulative += &irf.slice(s![h, .., ..]).mapv(|v| v * v);
        for i in 0..k {
            let total: f64 = cumulative.row(i).sum();
            if total > 0.0 {
                for j in 0..n_shocks {
                    fevd[[h, i, j]] = cumulative[[i, j]] / total;
                }
            }
        }
    }
    fevd
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::var::simulate::{SimulationOptions, simulate_var};
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - IRF₀ equal to the Cholesky factor of Σᵤ, tensor shapes.
    // - FEVD rows summing to one at every horizon.
    // - The recursion against a hand-computed VAR(1) power sequence.
    // - H = 0.
    // -------------------------------------------------------------------------

    fn fitted(p: usize) -> FittedVar {
        let y = simulate_var(
            &[array![[0.5, 0.2, 0.0], [0.0, 0.3, 0.1], [0.1, 0.0, 0.4]]],
            array![0.0, 0.1, -0.1].view(),
            array![[1.0, 0.0, 0.0], [0.4, 0.9, 0.0], [-0.2, 0.3, 0.7]].view(),
            &SimulationOptions::new(400, 100, Some(5)),
        )
        .unwrap();
        FittedVar::fit(y.view(), p).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // Impact responses are the Cholesky factor and shapes follow H.
    //
    // Given
    // -----
    // - A fitted VAR(2), horizon 12.
    //
    // Expect
    // ------
    // - irf[0] = chol(Σᵤ); all tensors (13, 3, 3); Φ₀ = I.
    fn irf_impact_equals_cholesky_factor() {
        // Arrange
        let model = fitted(2);
        let chol = lower_cholesky(model.sigma_u().view()).unwrap();

        // Act
        let out = compute_irf_fevd(&model, 12).unwrap();

        // Assert
        assert_eq!(out.irf.dim(), (13, 3, 3));
        assert_eq!(out.fevd.dim(), (13, 3, 3));
        assert_eq!(out.moving_average.dim(), (13, 3, 3));
        assert_eq!(out.horizon(), 12);
        for ((i, j), v) in chol.indexed_iter() {
            assert_abs_diff_eq!(out.irf[[0, i, j]], *v, epsilon = 1e-12);
            let eye = if i == j { 1.0 } else { 0.0 };
            assert_eq!(out.moving_average[[0, i, j]], eye);
        }
    }

    #[test]
    // Purpose
    // -------
    // FEVD shares are in [0, 1] and each row sums to one.
    //
    // Given
    // -----
    // - A fitted VAR(1), horizon 20.
    //
    // Expect
    // ------
    // - |∑ⱼ FEVD[h][i][j] − 1| < 1e-9 for every (h, i); at h = 0 the first
    //   variable is fully explained by shock 0.
    fn fevd_rows_sum_to_one() {
        // Arrange
        let model = fitted(1);

        // Act
        let out = compute_irf_fevd(&model, 20).unwrap();

        // Assert
        for h in 0..=20 {
            for i in 0..3 {
                let row = out.fevd.slice(s![h, i, ..]);
                assert!(row.iter().all(|&v| (0.0..=1.0).contains(&v)));
                assert_abs_diff_eq!(row.sum(), 1.0, epsilon = 1e-9);
            }
        }
        assert_abs_diff_eq!(out.fevd[[0, 0, 0]], 1.0, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // The recursion reproduces A₁ʰ L for a VAR(1).
    //
    // Given
    // -----
    // - A₁ = [[0.5, 0.1], [0.0, 0.2]], L = [[1, 0], [0.5, 1]].
    //
    // Expect
    // ------
    // - Θ₂ = A₁² L.
    fn propagate_matches_matrix_powers_for_var1() {
        // Arrange
        let a1 = array![[0.5, 0.1], [0.0, 0.2]];
        let l = array![[1.0, 0.0], [0.5, 1.0]];

        // Act
        let theta = propagate(&[a1.clone()], l.view(), 2);

        // Assert
        let expected = a1.dot(&a1).dot(&l);
        for ((i, j), v) in expected.indexed_iter() {
            assert_abs_diff_eq!(theta[[2, i, j]], *v, epsilon = 1e-14);
        }
    }

    #[test]
    // Purpose
    // -------
    // Horizon 0 yields only impact responses and a shares-at-impact FEVD.
    //
    // Given
    // -----
    // - A fitted VAR(1), horizon 0.
    //
    // Expect
    // ------
    // - Tensors of shape (1, 3, 3).
    fn horizon_zero_returns_impact_only() {
        let out = compute_irf_fevd(&fitted(1), 0).unwrap();
        assert_eq!(out.irf.dim(), (1, 3, 3));
        assert_eq!(out.fevd.dim(), (1, 3, 3));
    }
}
