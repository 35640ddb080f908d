//! pipeline::run — end-to-end reduced-form and structural analysis.
//!
//! Purpose
//! -------
//! Drive one analysis from an aligned table to every output artifact:
//!
//! 1. select the configured columns (dropping incomplete rows),
//! 2. scan lag orders and apply the selection rule,
//! 3. fit the final VAR at the override p, or at the chosen p,
//! 4. compute Cholesky IRFs and the FEVD,
//! 5. run sign-restricted identification on the orthogonalized IRFs.
//!
//! Invariants & assumptions
//! ------------------------
//! - Either every stage succeeds and a complete [`AnalysisReport`] is
//!   returned, or the first failing stage's error is returned.
//! - Stages are sequential; only the identification sampler may run in
//!   parallel internally.
use crate::data::TimeSeriesTable;
use crate::pipeline::config::AnalysisConfig;
use crate::pipeline::errors::PipelineResult;
use crate::svar::{Identification, identify};
use crate::var::{FittedVar, IrfFevd, LagSelection, ModelSummary, compute_irf_fevd, select_lag_order};
use tracing::{info, info_span};

/// AnalysisReport — every artifact of a successful run.
///
/// Fields
/// ------
/// - `selection`: one record per candidate p plus the chosen p.
/// - `lag_order`: p actually fitted (override or chosen).
/// - `model`: the final [`FittedVar`].
/// - `summary`: its [`ModelSummary`].
/// - `responses`: Cholesky IRF, FEVD, and MA tensors.
/// - `identification`: accepted structural draws and bands.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    pub selection: LagSelection,
    pub lag_order: usize,
    pub model: FittedVar,
    pub summary: ModelSummary,
    pub responses: IrfFevd,
    pub identification: Identification,
}

/// run_analysis — execute the configured pipeline on `table`.
///
/// Errors
/// ------
/// - `PipelineError::Data` for configuration or column-contract problems.
/// - `PipelineError::Var` for lag selection, estimation, or IRF failures
///   (`NoCandidates`, `InsufficientData`, `SingularCovariance`, …).
/// - `PipelineError::Svar` for identification failures, notably
///   `NoAcceptedDraws`.
pub fn run_analysis(table: &TimeSeriesTable, cfg: &AnalysisConfig) -> PipelineResult<AnalysisReport> {
    cfg.validate()?;
    let span = info_span!("run_analysis", n_vars = cfg.columns.len(), horizon = cfg.horizon);
    let _guard = span.enter();

    let selected = table.select(cfg.columns.as_slice())?;
    info!(rows = selected.nobs(), dropped = table.nobs() - selected.nobs(), "selected columns");
    let series = selected.values();

    let selection = select_lag_order(series, &cfg.lag_selection)?;
    let lag_order = cfg.lag_order.unwrap_or(selection.chosen);
    info!(chosen = selection.chosen, fitted = lag_order, "lag order fixed");

    let model = FittedVar::fit(series, lag_order)?;
    let summary = model.summary();
    info!(
        nobs = summary.nobs,
        aic = summary.criteria.aic,
        bic = summary.criteria.bic,
        stable = summary.stable,
        "fitted final VAR"
    );

    let responses = compute_irf_fevd(&model, cfg.horizon)?;
    let identification = identify(responses.irf.view(), &cfg.restrictions, &cfg.identification)?;
    info!(
        accepted = identification.accepted(),
        attempts = identification.attempts,
        "identification complete"
    );

    Ok(AnalysisReport { selection, lag_order, model, summary, responses, identification })
}
