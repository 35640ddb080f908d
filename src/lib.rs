//! rust_svar — reduced-form and sign-restricted structural VAR analysis with
//! Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that exposes
//! VAR estimation, lag selection, impulse responses, and sign-restricted
//! identification to Python via the `_rust_svar` extension module.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules as the public crate surface:
//!   [`data`] (aligned input tables), [`linalg`] (companion form, Cholesky,
//!   rotations), [`statistical_tests`] (Ljung–Box), [`var`] (estimation, lag
//!   selection, IRF/FEVD, simulation), [`svar`] (sign restrictions), and
//!   [`pipeline`] (end-to-end orchestration).
//! - Define `#[pyclass]` wrappers and the `#[pymodule]` initializer for the
//!   `_rust_svar` Python extension when `python-bindings` is enabled.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work is implemented in the inner Rust modules; this file
//!   performs only FFI glue, input conversion, and error mapping.
//! - Tensors cross the boundary as numpy arrays indexed
//!   `[horizon][variable][shock]`.
//!
//! Conventions
//! -----------
//! - Python-exposed classes live under `_rust_svar.<submodule>` and are
//!   registered in `sys.modules` as `rust_svar.<submodule>`.
//! - Errors from core Rust code are converted to `PyErr` values at the PyO3
//!   boundary (`ValueError`, `KeyError` for missing columns, `RuntimeError`
//!   for an exhausted draw budget).
//!
//! Downstream usage
//! ----------------
//! ```rust
//! use ndarray::{Array2, array};
//! use rust_svar::svar::{IdentificationOptions, Sign, SignRestrictions, identify};
//! use rust_svar::var::{FittedVar, SimulationOptions, compute_irf_fevd, simulate_var};
//!
//! let y = simulate_var(
//!     &[array![[0.5, 0.1], [0.0, 0.4]]],
//!     array![0.0, 0.0].view(),
//!     Array2::<f64>::eye(2).view(),
//!     &SimulationOptions::new(300, 100, Some(1)),
//! )
//! .unwrap();
//! let model = FittedVar::fit(y.view(), 1).unwrap();
//! let responses = compute_irf_fevd(&model, 12).unwrap();
//!
//! let restrictions = SignRestrictions::new(1).with(0, 0, Sign::Positive);
//! let opts = IdentificationOptions::new(1_000, 10, 5.0, 95.0, Some(3)).unwrap();
//! let structural = identify(responses.irf.view(), &restrictions, &opts).unwrap();
//! assert_eq!(structural.accepted(), 10);
//! ```
//!
//! Testing notes
//! -------------
//! - Numerical behavior is covered by unit tests in the inner modules and by
//!   the end-to-end scenarios in `tests/integration_var_pipeline.rs`.

pub mod data;
pub mod linalg;
pub mod pipeline;
pub mod statistical_tests;
pub mod svar;
pub mod utils;
pub mod var;

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArray1, PyArray2, PyArray3, PyArray4, PyReadonlyArray1};

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    statistical_tests::LBOutcome,
    svar::{IdentificationOptions, Identification, identify},
    utils::{
        extract_f64_array, extract_f64_matrix, extract_f64_tensor3, extract_rotation_sampler,
        extract_sign_restrictions,
    },
    var::{FittedVar, LagSelectionOptions, compute_irf_fevd},
};

/// LjungBox — Python-facing wrapper for the Ljung–Box whiteness test.
///
/// Constructed from Python via `LjungBox(data, lags=12)`; exposes the
/// cumulative statistics, their χ² p-values, and the minimum p-value.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_svar.statistical_tests")]
pub struct LjungBox {
    inner: LBOutcome,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl LjungBox {
    #[new]
    #[pyo3(text_signature = "(data, /, lags=12)", signature = (raw_data, lags = 12))]
    pub fn new<'py>(py: Python<'py>, raw_data: &Bound<'py, PyAny>, lags: usize) -> PyResult<Self> {
        let arr: PyReadonlyArray1<f64> = extract_f64_array(py, raw_data)?;
        let data: &[f64] = arr
            .as_slice()
            .map_err(|_| PyValueError::new_err("data must be a contiguous 1-D float64 array"))?;
        Ok(LjungBox { inner: LBOutcome::ljung_box(data, lags)? })
    }

    #[getter]
    pub fn statistics(&self) -> Vec<f64> {
        self.inner.statistics().to_vec()
    }

    #[getter]
    pub fn pvalues(&self) -> Vec<f64> {
        self.inner.p_values().to_vec()
    }

    #[getter]
    pub fn min_pvalue(&self) -> f64 {
        self.inner.min_p_value()
    }
}

/// FittedVAR — Python-facing wrapper for a reduced-form VAR(p) fit.
///
/// Purpose
/// -------
/// Fit a VAR with intercept from a 2-D array-like (rows = time) and expose
/// its estimates, diagnostics, and impulse responses as numpy arrays.
///
/// Parameters
/// ----------
/// Constructed from Python via `FittedVAR(data, p)`:
/// - `data`: 2-D numpy array, pandas DataFrame, or nested sequence.
/// - `p`: lag order ≥ 1.
///
/// Notes
/// -----
/// - Rust callers should use [`FittedVar`] directly.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_svar.var_models")]
pub struct FittedVAR {
    inner: FittedVar,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl FittedVAR {
    #[new]
    #[pyo3(text_signature = "(data, p, /)")]
    pub fn new<'py>(data: &Bound<'py, PyAny>, p: usize) -> PyResult<Self> {
        let series = extract_f64_matrix(data)?;
        Ok(FittedVAR { inner: FittedVar::fit(series.view(), p)? })
    }

    #[getter]
    pub fn lag_order(&self) -> usize {
        self.inner.lag_order()
    }

    #[getter]
    pub fn nobs(&self) -> usize {
        self.inner.nobs()
    }

    #[getter]
    pub fn neqs(&self) -> usize {
        self.inner.n_vars()
    }

    #[getter]
    pub fn intercept<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self.inner.intercept().clone().into_pyarray(py)
    }

    /// Lag matrices as a `(p, k, k)` array.
    #[getter]
    pub fn coefs<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray3<f64>> {
        self.inner.coefs_tensor().into_pyarray(py)
    }

    #[getter]
    pub fn resid<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.residuals().clone().into_pyarray(py)
    }

    #[getter]
    pub fn sigma_u<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.sigma_u().clone().into_pyarray(py)
    }

    #[getter]
    pub fn companion<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.companion().clone().into_pyarray(py)
    }

    #[getter]
    pub fn eigenvalue_moduli(&self) -> Option<Vec<f64>> {
        self.inner.eigenvalue_moduli()
    }

    #[getter]
    pub fn is_stable(&self) -> bool {
        self.inner.is_stable()
    }

    #[getter]
    pub fn aic(&self) -> f64 {
        self.inner.criteria().aic
    }

    #[getter]
    pub fn bic(&self) -> f64 {
        self.inner.criteria().bic
    }

    #[getter]
    pub fn hqic(&self) -> f64 {
        self.inner.criteria().hqic
    }

    #[getter]
    pub fn fpe(&self) -> f64 {
        self.inner.criteria().fpe
    }

    /// Minimum Ljung–Box p-value over equations and lags 1..=`lags`.
    #[pyo3(signature = (lags = 12))]
    pub fn whiteness(&self, lags: usize) -> PyResult<f64> {
        Ok(self.inner.whiteness(lags)?)
    }

    /// Cholesky IRF and FEVD tensors, each `(horizon + 1, k, k)`.
    #[pyo3(signature = (horizon = 30))]
    pub fn irf_fevd<'py>(
        &self, py: Python<'py>, horizon: usize,
    ) -> PyResult<(Bound<'py, PyArray3<f64>>, Bound<'py, PyArray3<f64>>)> {
        let out = compute_irf_fevd(&self.inner, horizon)?;
        Ok((out.irf.into_pyarray(py), out.fevd.into_pyarray(py)))
    }

    pub fn summary(&self) -> String {
        self.inner.summary().to_string()
    }
}

/// select_lag_order — scan p = 1..=p_max from Python.
///
/// Returns `(records, chosen)` where `records` is a list of
/// `(p, stable, min_pvalue)` tuples.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(signature = (data, p_max = 15, whiteness_lags = 12, alpha = 0.05))]
pub fn select_lag_order<'py>(
    data: &Bound<'py, PyAny>, p_max: usize, whiteness_lags: usize, alpha: f64,
) -> PyResult<(Vec<(usize, bool, f64)>, usize)> {
    let series = extract_f64_matrix(data)?;
    let opts = LagSelectionOptions::new(p_max, whiteness_lags, alpha)?;
    let selection = crate::var::select_lag_order(series.view(), &opts)?;
    let records =
        selection.candidates.iter().map(|c| (c.lag_order, c.stable, c.whiteness_min_p)).collect();
    Ok((records, selection.chosen))
}

/// SignIdentification — Python-facing wrapper for sign-restricted
/// identification.
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `SignIdentification(irf, signs, check_horizons=1, max_draws=20000,
/// target_accepted=200, lower_pct=5.0, upper_pct=95.0, seed=None,
/// sampler=None)`:
/// - `irf`: orthogonalized `(H + 1, k, k)` responses.
/// - `signs`: `{variable: {shock: ±1}}`.
/// - `sampler`: `"plain_qr"` (default) or `"haar"`.
///
/// Raises `RuntimeError` when no draw is accepted.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_svar.identification")]
pub struct SignIdentification {
    inner: Identification,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl SignIdentification {
    #[new]
    #[pyo3(
        signature = (
            irf,
            signs,
            check_horizons = 1,
            max_draws = 20_000,
            target_accepted = 200,
            lower_pct = 5.0,
            upper_pct = 95.0,
            seed = None,
            sampler = None,
        ),
        text_signature = "(irf, signs, /, check_horizons=1, max_draws=20000, \
                          target_accepted=200, lower_pct=5.0, upper_pct=95.0, seed=None, \
                          sampler=None)"
    )]
    pub fn new<'py>(
        py: Python<'py>, irf: &Bound<'py, PyAny>, signs: &Bound<'py, PyAny>,
        check_horizons: usize, max_draws: usize, target_accepted: usize, lower_pct: f64,
        upper_pct: f64, seed: Option<u64>, sampler: Option<&str>,
    ) -> PyResult<Self> {
        let responses = extract_f64_tensor3(irf)?;
        let restrictions = extract_sign_restrictions(signs, check_horizons)?;
        let opts =
            IdentificationOptions::new(max_draws, target_accepted, lower_pct, upper_pct, seed)?
                .with_sampler(extract_rotation_sampler(sampler)?);
        let inner = py.allow_threads(|| identify(responses.view(), &restrictions, &opts))?;
        Ok(SignIdentification { inner })
    }

    /// Accepted draws as `(n_accepted, H + 1, k, k)`.
    #[getter]
    pub fn draws<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray4<f64>> {
        self.inner.stacked_draws().into_pyarray(py)
    }

    #[getter]
    pub fn median<'py>(&self, py: Python<'py>) -> Option<Bound<'py, PyArray3<f64>>> {
        self.inner.bands.as_ref().map(|b| b.median.clone().into_pyarray(py))
    }

    #[getter]
    pub fn lower<'py>(&self, py: Python<'py>) -> Option<Bound<'py, PyArray3<f64>>> {
        self.inner.bands.as_ref().map(|b| b.lower.clone().into_pyarray(py))
    }

    #[getter]
    pub fn upper<'py>(&self, py: Python<'py>) -> Option<Bound<'py, PyArray3<f64>>> {
        self.inner.bands.as_ref().map(|b| b.upper.clone().into_pyarray(py))
    }

    #[getter]
    pub fn attempts(&self) -> usize {
        self.inner.attempts
    }

    #[getter]
    pub fn accepted(&self) -> usize {
        self.inner.accepted()
    }

    /// "accepted" when the target was reached, "exhausted" otherwise.
    #[getter]
    pub fn status(&self) -> &'static str {
        match self.inner.status {
            crate::svar::SamplerState::Exhausted => "exhausted",
            _ => "accepted",
        }
    }

    #[getter]
    pub fn seed(&self) -> u64 {
        self.inner.seed
    }
}

/// _rust_svar — PyO3 module initializer for the Python extension.
///
/// Creates the `statistical_tests`, `var_models`, and `identification`
/// submodules, attaches them to `_rust_svar`, and registers them in
/// `sys.modules` so dotted imports work.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_svar<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let statistical_tests_mod = PyModule::new(_py, "statistical_tests")?;
    let var_models_mod = PyModule::new(_py, "var_models")?;
    let identification_mod = PyModule::new(_py, "identification")?;
    statistical_tests(_py, m, &statistical_tests_mod)?;
    var_models(_py, m, &var_models_mod)?;
    identification(_py, m, &identification_mod)?;

    let modules = _py.import("sys")?.getattr("modules")?;
    modules.set_item("rust_svar.statistical_tests", statistical_tests_mod)?;
    modules.set_item("rust_svar.var_models", var_models_mod)?;
    modules.set_item("rust_svar.identification", identification_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn statistical_tests<'py>(
    _py: Python, rust_svar: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<LjungBox>()?;
    rust_svar.add_submodule(m)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn var_models<'py>(
    _py: Python, rust_svar: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<FittedVAR>()?;
    m.add_function(wrap_pyfunction!(select_lag_order, m)?)?;
    rust_svar.add_submodule(m)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn identification<'py>(
    _py: Python, rust_svar: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<SignIdentification>()?;
    rust_svar.add_submodule(m)?;
    Ok(())
}
