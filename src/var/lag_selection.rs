//! var::lag_selection — choose p by stability and residual whiteness.
//!
//! Purpose
//! -------
//! Scan p = 1..=p_max, fit a VAR(p) for each candidate, and pick the
//! smallest lag order whose fit is both stable and leaves white residuals.
//!
//! Key behaviors
//! -------------
//! - Each candidate records `stable` (companion eigenvalues inside the unit
//!   circle) and `whiteness_min_p` (minimum Ljung–Box p-value over all
//!   equations and lags 1..m).
//! - Acceptance: the smallest p with `stable && whiteness_min_p > alpha`.
//! - Fallback when nothing is accepted: the p with the largest
//!   `whiteness_min_p`, ties broken toward the smaller p. If every p-value
//!   is NaN, p = 1.
//! - p = 1 being infeasible is `NoCandidates`. A larger p without enough
//!   observations is recorded as unstable with a NaN p-value, so the report
//!   always holds `p_max` rows and such a p is never chosen.
//!
//! Invariants & assumptions
//! ------------------------
//! - A residual column with zero variance or invalid data makes that
//!   candidate's p-value NaN: it can never be accepted and is ignored by the
//!   fallback. Misconfigured whiteness lags (m = 0 or m ≥ nobs) are
//!   propagated as `VarError::Whiteness`.
use crate::statistical_tests::LBError;
use crate::var::errors::{VarError, VarResult};
use crate::var::estimator::FittedVar;
use ndarray::ArrayView2;
use tracing::{info, warn};

/// LagSelectionOptions — search range and whiteness test settings.
///
/// Fields
/// ------
/// - `p_max`: largest candidate lag order (≥ 1).
/// - `whiteness_lags`: Ljung–Box lags m (≥ 1).
/// - `alpha`: significance level in (0, 1).
///
/// Defaults: `p_max = 15`, `whiteness_lags = 12`, `alpha = 0.05`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LagSelectionOptions {
    pub p_max: usize,
    pub whiteness_lags: usize,
    pub alpha: f64,
}

impl LagSelectionOptions {
    /// Build validated options.
    ///
    /// Errors
    /// ------
    /// - `VarError::NoCandidates` if `p_max == 0`.
    /// - `VarError::InvalidAlpha` unless `0 < alpha < 1`.
    /// - `VarError::Whiteness(LBError::InvalidLags(0))` if `whiteness_lags == 0`.
    pub fn new(p_max: usize, whiteness_lags: usize, alpha: f64) -> VarResult<Self> {
        let opts = LagSelectionOptions { p_max, whiteness_lags, alpha };
        opts.validate()?;
        Ok(opts)
    }

    fn validate(&self) -> VarResult<()> {
        if self.p_max == 0 {
            return Err(VarError::NoCandidates { p_max: 0, rows: 0 });
        }
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(VarError::InvalidAlpha { alpha: self.alpha });
        }
        if self.whiteness_lags == 0 {
            return Err(VarError::Whiteness(LBError::InvalidLags(0)));
        }
        Ok(())
    }
}

impl Default for LagSelectionOptions {
    fn default() -> Self {
        LagSelectionOptions { p_max: 15, whiteness_lags: 12, alpha: 0.05 }
    }
}

/// Diagnostics recorded for one candidate lag order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LagCandidate {
    pub lag_order: usize,
    pub stable: bool,
    /// Minimum Ljung–Box p-value; NaN when the test is undefined.
    pub whiteness_min_p: f64,
}

impl LagCandidate {
    /// True iff stable with white residuals at level `alpha`.
    pub fn accepted(&self, alpha: f64) -> bool {
        self.stable && self.whiteness_min_p > alpha
    }
}

/// LagSelection — every evaluated candidate plus the chosen p.
#[derive(Debug, Clone, PartialEq)]
pub struct LagSelection {
    pub candidates: Vec<LagCandidate>,
    pub chosen: usize,
    /// False when `chosen` came from the fallback rule.
    pub accepted: bool,
}

/// select_lag_order — scan p = 1..=p_max and apply the selection rule.
///
/// Parameters
/// ----------
/// - `series`: `ArrayView2<f64>`
///   `n × k` stationary series, finite.
/// - `opts`: [`LagSelectionOptions`]
///
/// Returns
/// -------
/// `VarResult<LagSelection>`
///
/// Errors
/// ------
/// - Option validation errors (see [`LagSelectionOptions::new`]).
/// - `VarError::NoCandidates` if even p = 1 cannot be fitted for lack of
///   data.
/// - `VarError::Whiteness` if the Ljung–Box test is misconfigured for a
///   candidate's residuals (e.g. m ≥ nobs).
/// - Any other estimation error from [`FittedVar::fit`].
pub fn select_lag_order(series: ArrayView2<'_, f64>, opts: &LagSelectionOptions) -> VarResult<LagSelection> {
    opts.validate()?;
    let rows = series.nrows();
    let mut candidates = Vec::with_capacity(opts.p_max);

    for p in 1..=opts.p_max {
        let model = match FittedVar::fit(series, p) {
            Ok(model) => model,
            Err(VarError::InsufficientData { .. }) if p == 1 => {
                return Err(VarError::NoCandidates { p_max: opts.p_max, rows });
            }
            Err(VarError::InsufficientData { nobs, required, .. }) => {
                warn!(lag_order = p, nobs, required, "too few observations for candidate; recording as rejected");
                candidates.push(LagCandidate { lag_order: p, stable: false, whiteness_min_p: f64::NAN });
                continue;
            }
            Err(err) => return Err(err),
        };

        let whiteness_min_p = match model.whiteness(opts.whiteness_lags) {
            Ok(p_value) => p_value,
            Err(LBError::ZeroVariance) | Err(LBError::InvalidData(_)) => {
                warn!(lag_order = p, "whiteness test undefined for residuals; recording NaN");
                f64::NAN
            }
            Err(err) => return Err(err.into()),
        };
        let candidate = LagCandidate { lag_order: p, stable: model.is_stable(), whiteness_min_p };
        info!(
            lag_order = p,
            stable = candidate.stable,
            whiteness_min_p,
            accepted = candidate.accepted(opts.alpha),
            "evaluated lag candidate"
        );
        candidates.push(candidate);
    }

    let chosen_accepted = choose_lag_order(&candidates, opts.alpha);
    let (chosen, accepted) = match chosen_accepted {
        Some(p) => (p, true),
        None => {
            let p = fallback_lag_order(&candidates);
            warn!(lag_order = p, alpha = opts.alpha, "no candidate stable and white; using fallback");
            (p, false)
        }
    };
    info!(lag_order = chosen, accepted, "selected lag order");

    Ok(LagSelection { candidates, chosen, accepted })
}

/// choose_lag_order — smallest accepted candidate, if any.
///
/// Examples
/// --------
/// ```rust
/// use rust_svar::var::{LagCandidate, choose_lag_order};
///
/// let cands = [
///     LagCandidate { lag_order: 1, stable: true, whiteness_min_p: 0.01 },
///     LagCandidate { lag_order: 2, stable: false, whiteness_min_p: 0.30 },
///     LagCandidate { lag_order: 3, stable: true, whiteness_min_p: 0.20 },
/// ];
/// assert_eq!(choose_lag_order(&cands, 0.05), Some(3));
/// ```
pub fn choose_lag_order(candidates: &[LagCandidate], alpha: f64) -> Option<usize> {
    candidates.iter().filter(|c| c.accepted(alpha)).map(|c| c.lag_order).min()
}

/// Largest finite p-value, ties to the smaller lag order; 1 if none finite.
pub fn fallback_lag_order(candidates: &[LagCandidate]) -> usize {
    let mut best: Option<&LagCandidate> = None;
    for c in candidates.iter().filter(|c| !c.whiteness_min_p.is_nan()) {
        best = match best {
            Some(b) if b.whiteness_min_p > c.whiteness_min_p => Some(b),
            Some(b) if b.whiteness_min_p == c.whiteness_min_p && b.lag_order < c.lag_order => {
                Some(b)
            }
            _ => Some(c),
        };
    }
    best.map_or(1, |c| c.lag_order)
}
