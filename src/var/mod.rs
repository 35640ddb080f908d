//! var — reduced-form vector autoregressions.
//!
//! Purpose
//! -------
//! Estimate VAR(p) models, choose p, and derive impulse responses and
//! variance decompositions. This subtree is the reduced-form half of the
//! analysis; structural identification lives in [`crate::svar`].
//!
//! Key behaviors
//! -------------
//! - [`FittedVar::fit`] performs multivariate OLS with intercept.
//! - [`select_lag_order`] scans candidate lag orders with stability and
//!   Ljung–Box whiteness diagnostics.
//! - [`compute_irf_fevd`] produces Cholesky-orthogonalized responses and
//!   the FEVD.
//! - [`simulate_var`] generates synthetic paths from a known process.
//!
//! Downstream usage
//! ----------------
//! ```rust
//! use ndarray::{Array2, array};
//! use rust_svar::var::{FittedVar, SimulationOptions, compute_irf_fevd, simulate_var};
//!
//! let y = simulate_var(
//!     &[array![[0.5, 0.0], [0.1, 0.3]]],
//!     array![0.0, 0.0].view(),
//!     Array2::<f64>::eye(2).view(),
//!     &SimulationOptions::default(),
//! )
//! .unwrap();
//! let model = FittedVar::fit(y.view(), 1).unwrap();
//! let responses = compute_irf_fevd(&model, 8).unwrap();
//! assert_eq!(responses.irf.dim(), (9, 2, 2));
//! ```

pub mod errors;
pub mod estimator;
pub mod irf;
pub mod lag_selection;
pub mod simulate;

pub use self::errors::{VarError, VarResult};
pub use self::estimator::{FittedVar, InfoCriteria, ModelSummary};
pub use self::irf::{IrfFevd, compute_irf_fevd, fevd_from_irf, propagate};
pub use self::lag_selection::{
    LagCandidate, LagSelection, LagSelectionOptions, choose_lag_order, fallback_lag_order,
    select_lag_order,
};
pub use self::simulate::{SimulationOptions, simulate_var};
