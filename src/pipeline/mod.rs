//! pipeline — configuration and orchestration of a full analysis.
//!
//! Purpose
//! -------
//! Tie the data contract, reduced-form estimation, and sign-restricted
//! identification into a single call, [`run_analysis`], configured by an
//! explicit [`AnalysisConfig`].
//!
//! Conventions
//! -----------
//! - Logging goes through `tracing`; the library never installs a
//!   subscriber. Binaries and tests choose their own.
//! - Serialization of the report is left to the caller.

pub mod config;
pub mod errors;
pub mod run;

pub use self::config::AnalysisConfig;
pub use self::errors::{PipelineError, PipelineResult};
pub use self::run::{AnalysisReport, run_analysis};
