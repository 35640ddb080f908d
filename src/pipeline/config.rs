//! pipeline::config — the full configuration surface of an analysis run.
//!
//! Purpose
//! -------
//! Collect every recognized option in one explicit value (no globals):
//! the series to model, lag-selection settings, an optional lag-order
//! override, the response horizon, the sign-restriction map, and the
//! identification budget.
//!
//! Key behaviors
//! -------------
//! - [`AnalysisConfig::new`] validates the pieces that do not depend on the
//!   data (non-empty, unique columns; a positive override).
//! - [`AnalysisConfig::reference_oil_market`] reproduces the four-variable
//!   oil-market study: production, OECD consumption, real WTI, and
//!   inventories (all log-differenced), VAR(12), 30-month horizon.
use crate::data::DataError;
use crate::pipeline::errors::{PipelineError, PipelineResult};
use crate::svar::{IdentificationOptions, Sign, SignRestrictions};
use crate::var::{LagSelectionOptions, VarError};
use std::collections::HashSet;

/// AnalysisConfig — options for [`crate::pipeline::run_analysis`].
///
/// Fields
/// ------
/// - `columns`: series to model, in shock-ordering order.
/// - `lag_selection`: [`LagSelectionOptions`] for the diagnostic scan.
/// - `lag_order`: `Option<usize>`
///   If set, the model is fitted at this p regardless of the selector's
///   choice (the scan still runs and is reported).
/// - `horizon`: IRF/FEVD horizon H.
/// - `restrictions`: [`SignRestrictions`].
/// - `identification`: [`IdentificationOptions`].
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub columns: Vec<String>,
    pub lag_selection: LagSelectionOptions,
    pub lag_order: Option<usize>,
    pub horizon: usize,
    pub restrictions: SignRestrictions,
    pub identification: IdentificationOptions,
}

impl AnalysisConfig {
    /// Build a validated configuration.
    ///
    /// Errors
    /// ------
    /// - `DataError::NoColumns` if `columns` is empty.
    /// - `DataError::DuplicateColumn` for a repeated column.
    /// - `VarError::InvalidLagOrder` for an override of 0.
    /// - Option validation errors from the nested option types.
    pub fn new(
        columns: Vec<String>, lag_selection: LagSelectionOptions, lag_order: Option<usize>,
        horizon: usize, restrictions: SignRestrictions, identification: IdentificationOptions,
    ) -> PipelineResult<Self> {
        let cfg = AnalysisConfig {
            columns,
            lag_selection,
            lag_order,
            horizon,
            restrictions,
            identification,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> PipelineResult<()> {
        if self.columns.is_empty() {
            return Err(DataError::NoColumns.into());
        }
        let mut seen = HashSet::with_capacity(self.columns.len());
        for name in &self.columns {
            if !seen.insert(name.as_str()) {
                return Err(DataError::DuplicateColumn { name: name.clone() }.into());
            }
        }
        if self.lag_order == Some(0) {
            return Err(VarError::InvalidLagOrder { lag_order: 0 }.into());
        }
        LagSelectionOptions::new(
            self.lag_selection.p_max,
            self.lag_selection.whiteness_lags,
            self.lag_selection.alpha,
        )?;
        self.identification.validate().map_err(PipelineError::from)
    }

    /// The four-variable oil-market configuration.
    ///
    /// Shock order is [supply, aggregate demand, precautionary demand,
    /// residual]; restrictions hold on impact only:
    /// - production: −supply, +aggregate demand;
    /// - real price: +supply, +aggregate demand, +precautionary;
    /// - inventories: +precautionary.
    pub fn reference_oil_market() -> Self {
        let restrictions = SignRestrictions::new(1)
            .with(0, 0, Sign::Negative)
            .with(0, 1, Sign::Positive)
            .with(2, 0, Sign::Positive)
            .with(2, 1, Sign::Positive)
            .with(2, 2, Sign::Positive)
            .with(3, 2, Sign::Positive);
        AnalysisConfig {
            columns: ["Production_DL", "OCSE_DL", "WTI_real_DL", "Inventories_DL"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            lag_selection: LagSelectionOptions { p_max: 15, whiteness_lags: 12, alpha: 0.05 },
            lag_order: Some(12),
            horizon: 30,
            restrictions,
            identification: IdentificationOptions {
                max_draws: 20_000,
                target_accepted: 200,
                ..IdentificationOptions::default()
            },
        }
    }
}
