//! data — the aligned-table contract consumed by the VAR pipeline.
//!
//! Purpose
//! -------
//! Describe, validate, and project the multivariate series produced by the
//! upstream ETL collaborator. Ingestion, cleaning, date alignment, and
//! transformations (log-differences, z-scores) happen before this point;
//! this module only checks the result and selects the configured columns.
//!
//! Key behaviors
//! -------------
//! - [`TimeSeriesTable`] holds timestamps, column names, and values.
//! - [`DataError`] reports contract violations, including
//!   `MissingColumns` for configured series absent from the table.

pub mod errors;
pub mod table;

pub use self::errors::{DataError, DataResult};
pub use self::table::TimeSeriesTable;
