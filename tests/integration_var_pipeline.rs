//! Integration tests for the VAR / sign-restricted SVAR pipeline.
//!
//! Purpose
//! -------
//! - Validate the end-to-end analysis: from an aligned, timestamped table,
//!   through lag selection and the final VAR fit, to Cholesky IRFs, FEVD,
//!   and sign-restricted identification.
//! - Use a realistic 4-variable monthly panel (400 observations) simulated
//!   from a known stable VAR(2) whose impact matrix admits the oil-market
//!   sign pattern.
//!
//! Coverage
//! --------
//! - `data::TimeSeriesTable`: column selection and the missing-column
//!   contract.
//! - `var`: lag-selection report and rule, VAR(12) fit, IRF/FEVD shapes.
//! - `svar`: stopping at the target or the budget, exact restriction
//!   satisfaction, zero budget.
//! - `pipeline::run_analysis`: stage wiring and error propagation.
//!
//! Exclusions
//! ----------
//! - Python bindings.
//! - Statistical size/power of the whiteness test.
use chrono::{Months, NaiveDate};
use ndarray::{Array2, array, s};
use rust_svar::{
    data::{DataError, TimeSeriesTable},
    pipeline::{AnalysisConfig, PipelineError, run_analysis},
    svar::{IdentificationOptions, SamplerState, SvarError, violates},
    var::{FittedVar, SimulationOptions, choose_lag_order, compute_irf_fevd, fallback_lag_order, simulate_var},
};

const COLUMNS: [&str; 4] = ["Production_DL", "OCSE_DL", "WTI_real_DL", "Inventories_DL"];

/// Purpose
/// -------
/// Build a 400-row monthly table from a stable VAR(2) with an extra,
/// unselected column carrying a few missing values.
///
/// Notes
/// -----
/// - The impact matrix has the oil-market sign pattern in its first three
///   columns, so the restrictions are satisfiable.
fn oil_like_table(seed: u64) -> TimeSeriesTable {
    let a1 = array![
        [0.30, 0.05, 0.00, 0.02],
        [0.05, 0.25, 0.03, 0.00],
        [0.00, 0.10, 0.35, 0.05],
        [0.02, 0.00, 0.05, 0.20]
    ];
    let a2 = array![
        [0.10, 0.00, 0.02, 0.00],
        [0.00, 0.10, 0.00, 0.02],
        [0.05, 0.00, 0.10, 0.00],
        [0.00, 0.02, 0.00, 0.10]
    ];
    let impact = array![
        [-0.8, 0.4, 0.05, 0.1],
        [0.1, 0.9, 0.05, 0.1],
        [0.5, 0.5, 0.7, 0.1],
        [0.05, 0.05, 0.6, 0.5]
    ];
    let y = simulate_var(
        &[a1, a2],
        array![0.0, 0.0, 0.0, 0.0].view(),
        impact.view(),
        &SimulationOptions::new(400, 300, Some(seed)),
    )
    .expect("valid DGP");

    let mut values = Array2::<f64>::zeros((400, 5));
    values.slice_mut(s![.., ..4]).assign(&y);
    for t in 0..400 {
        values[[t, 4]] = if t % 50 == 7 { f64::NAN } else { t as f64 };
    }

    let start = NaiveDate::from_ymd_opt(1990, 1, 1).expect("valid date");
    let timestamps = (0..400u32)
        .map(|i| start.checked_add_months(Months::new(i)).expect("in range"))
        .collect();
    let mut columns: Vec<String> = COLUMNS.iter().map(|c| c.to_string()).collect();
    columns.push("Unused".to_string());

    TimeSeriesTable::new(timestamps, columns, values).expect("valid table")
}

fn fast_config() -> AnalysisConfig {
    let mut cfg = AnalysisConfig::reference_oil_market();
    cfg.identification.seed = Some(2026);
    cfg
}

#[test]
// Purpose
// -------
// Scenario A: the selection report has one record per candidate and the
// chosen p follows the rule.
//
// Given
// -----
// - 400 observations of 4 variables, p_max = 15, 12 LB lags, α = 0.05.
//
// Expect
// ------
// - 15 records, p = 1..15 in order, p-values in [0, 1].
// - Chosen p is the smallest stable-and-white candidate when one exists,
//   otherwise the largest-p-value fallback; always in [1, 15].
fn scenario_a_lag_selection_report_follows_rule() {
    // Arrange
    let table = oil_like_table(11);
    let cfg = fast_config();

    // Act
    let report = run_analysis(&table, &cfg).expect("pipeline succeeds");

    // Assert
    let sel = &report.selection;
    assert_eq!(sel.candidates.len(), 15);
    for (i, c) in sel.candidates.iter().enumerate() {
        assert_eq!(c.lag_order, i + 1);
        assert!((0.0..=1.0).contains(&c.whiteness_min_p));
    }
    assert!((1..=15).contains(&sel.chosen));
    match choose_lag_order(&sel.candidates, cfg.lag_selection.alpha) {
        Some(p) => {
            assert_eq!(sel.chosen, p);
            assert!(sel.candidates[p - 1].stable);
            assert!(sel.candidates[p - 1].whiteness_min_p > cfg.lag_selection.alpha);
        }
        None => assert_eq!(sel.chosen, fallback_lag_order(&sel.candidates)),
    }
}

#[test]
// Purpose
// -------
// Scenario B: a VAR(12) on the same data with horizon 30.
//
// Given
// -----
// - The selected 4-column series, p = 12, H = 30.
//
// Expect
// ------
// - IRF and FEVD tensors of shape (31, 4, 4); FEVD rows sum to 1 at h = 30.
// - The pipeline report fits the override p = 12 and agrees with a direct fit.
fn scenario_b_var12_irf_and_fevd_shapes() {
    // Arrange
    let table = oil_like_table(12);
    let selected = table.select(&COLUMNS).expect("columns present");
    let cfg = fast_config();

    // Act
    let model = FittedVar::fit(selected.values(), 12).expect("fit succeeds");
    let out = compute_irf_fevd(&model, 30).expect("Σᵤ positive definite");
    let report = run_analysis(&table, &cfg).expect("pipeline succeeds");

    // Assert
    assert_eq!(out.irf.dim(), (31, 4, 4));
    assert_eq!(out.fevd.dim(), (31, 4, 4));
    for i in 0..4 {
        let row_sum: f64 = out.fevd.slice(s![30, i, ..]).sum();
        assert!((row_sum - 1.0).abs() < 1e-9, "row {i} sums to {row_sum}");
    }
    assert_eq!(report.lag_order, 12);
    assert_eq!(report.summary.lag_order, 12);
    assert_eq!(report.summary.neqs, 4);
    assert_eq!(report.summary.resid_shape, (report.summary.nobs, 4));
    assert_eq!(report.responses.irf, out.irf);
}

#[test]
// Purpose
// -------
// Scenario C: oil-market sign restrictions on impact, 200 target, 20 000
// budget.
//
// Given
// -----
// - Restrictions {0: {0: −, 1: +}, 2: {0: +, 1: +, 2: +}, 3: {2: +}}.
//
// Expect
// ------
// - Either exactly 200 accepted draws, or fewer with attempts == 20 000.
// - Every accepted draw satisfies every restriction; bands are present and
//   ordered.
fn scenario_c_sign_restrictions_accept_or_exhaust() {
    // Arrange
    let table = oil_like_table(13);
    let cfg = fast_config();

    // Act
    let report = run_analysis(&table, &cfg).expect("pipeline succeeds");

    // Assert
    let ident = &report.identification;
    match ident.status {
        SamplerState::Accepted => assert_eq!(ident.accepted(), 200),
        SamplerState::Exhausted => {
            assert!(ident.accepted() < 200);
            assert_eq!(ident.attempts, 20_000);
        }
        other => panic!("unexpected terminal state {other:?}"),
    }
    assert!(ident.draws.iter().all(|d| !violates(d.view(), &cfg.restrictions)));
    let bands = ident.bands.as_ref().expect("bands for accepted draws");
    assert_eq!(bands.median.dim(), (31, 4, 4));
    for ((l, m), u) in bands.lower.iter().zip(bands.median.iter()).zip(bands.upper.iter()) {
        assert!(l <= m && m <= u);
    }
    assert_eq!(ident.seed, 2026);
}

#[test]
// Purpose
// -------
// Scenario D: a zero draw budget fails with zero attempts.
//
// Given
// -----
// - The reference configuration with `max_draws = 0`.
//
// Expect
// ------
// - `PipelineError::Svar(SvarError::NoAcceptedDraws { attempts: 0 })`.
fn scenario_d_zero_budget_reports_no_accepted_draws() {
    // Arrange
    let table = oil_like_table(14);
    let mut cfg = fast_config();
    cfg.identification = IdentificationOptions { max_draws: 0, ..cfg.identification.clone() };

    // Act
    let result = run_analysis(&table, &cfg);

    // Assert
    assert_eq!(result, Err(PipelineError::Svar(SvarError::NoAcceptedDraws { attempts: 0 })));
}

#[test]
// Purpose
// -------
// A configured column absent from the table is reported by name, and
// nothing else runs.
//
// Given
// -----
// - The reference configuration with "Inventories_DL" renamed.
//
// Expect
// ------
// - `PipelineError::Data(DataError::MissingColumns { missing: ["Stocks_DL"] })`.
fn missing_columns_are_reported_by_name() {
    // Arrange
    let table = oil_like_table(15);
    let mut cfg = fast_config();
    cfg.columns[3] = "Stocks_DL".to_string();

    // Act
    let result = run_analysis(&table, &cfg);

    // Assert
    assert_eq!(
        result,
        Err(PipelineError::Data(DataError::MissingColumns { missing: vec!["Stocks_DL".to_string()] }))
    );
}

#[test]
// Purpose
// -------
// Without an override the pipeline fits the selected p, and identical
// seeds give identical reports.
//
// Given
// -----
// - `lag_order = None`, a smaller draw budget, two runs.
//
// Expect
// ------
// - `report.lag_order == selection.chosen`; both reports equal.
fn pipeline_without_override_fits_selected_lag_deterministically() {
    // Arrange
    let table = oil_like_table(16);
    let mut cfg = fast_config();
    cfg.lag_order = None;
    cfg.lag_selection.p_max = 6;
    cfg.identification.max_draws = 2_000;
    cfg.identification.target_accepted = 20;

    // Act
    let a = run_analysis(&table, &cfg).expect("pipeline succeeds");
    let b = run_analysis(&table, &cfg).expect("pipeline succeeds");

    // Assert
    assert_eq!(a.lag_order, a.selection.chosen);
    assert_eq!(a.model.lag_order(), a.selection.chosen);
    assert_eq!(a, b);
}
