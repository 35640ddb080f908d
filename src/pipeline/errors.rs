//! pipeline::errors — one error type for the end-to-end analysis.
//!
//! [`PipelineError`] wraps the subtree errors unchanged (via `From`), so a
//! caller can match on the stage that failed and still reach the original
//! variant and its context.
use crate::data::DataError;
use crate::svar::SvarError;
use crate::var::VarError;

#[cfg(feature = "python-bindings")]
use pyo3::PyErr;

pub type PipelineResult<T> = Result<T, PipelineError>;

#[derive(Debug, Clone, PartialEq)]
pub enum PipelineError {
    /// Input table violated its contract (e.g. missing columns).
    Data(DataError),
    /// Estimation, lag selection, or IRF/FEVD failed.
    Var(VarError),
    /// Sign-restricted identification failed.
    Svar(SvarError),
}

impl From<DataError> for PipelineError {
    fn from(err: DataError) -> Self {
        PipelineError::Data(err)
    }
}

impl From<VarError> for PipelineError {
    fn from(err: VarError) -> Self {
        PipelineError::Var(err)
    }
}

impl From<SvarError> for PipelineError {
    fn from(err: SvarError) -> Self {
        PipelineError::Svar(err)
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PipelineError::Data(err) => Some(err),
            PipelineError::Var(err) => Some(err),
            PipelineError::Svar(err) => Some(err),
        }
    }
}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineError::Data(err) => write!(f, "{err}"),
            PipelineError::Var(err) => write!(f, "{err}"),
            PipelineError::Svar(err) => write!(f, "{err}"),
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<PipelineError> for PyErr {
    fn from(err: PipelineError) -> PyErr {
        match err {
            PipelineError::Data(e) => e.into(),
            PipelineError::Var(e) => e.into(),
            PipelineError::Svar(e) => e.into(),
        }
    }
}
