//! statistical_tests — residual whiteness diagnostics.
//!
//! Purpose
//! -------
//! Collect the portmanteau tests used to judge whether a fitted VAR has
//! captured the serial dependence in its data. This subtree implements the
//! Ljung–Box test together with common input validation and error
//! handling, including a Python bridge for PyO3-based bindings.
//!
//! Key behaviors
//! -------------
//! - Expose the Ljung–Box test via [`LBOutcome`] and its constructor
//!   [`LBOutcome::ljung_box`](ljung_box::LBOutcome::ljung_box).
//! - Reduce a multi-equation residual matrix to the scalar whiteness
//!   verdict used by lag selection via [`min_p_value_over_columns`].
//! - Centralize input guards in [`validate_input`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs are finite residual series; every public routine validates
//!   before computing autocorrelations and never panics on user input.
//!
//! Downstream usage
//! ----------------
//! - Typical Rust code imports the main surface as:
//!
//!   ```rust
//!   use rust_svar::statistical_tests::{LBOutcome, LBResult};
//!
//!   fn worst_lag_p(resid: &[f64]) -> LBResult<f64> {
//!       Ok(LBOutcome::ljung_box(resid, 12)?.min_p_value())
//!   }
//!   ```
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each module: error messages in [`errors`],
//!   guard branches in [`validation`], and statistic correctness in
//!   [`ljung_box`].

pub mod errors;
pub mod ljung_box;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{LBError, LBResult};
pub use self::ljung_box::{LBOutcome, min_p_value_over_columns};
pub use self::validation::validate_input;
