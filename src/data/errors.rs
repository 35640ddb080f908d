//! data::errors — violations of the aligned-table input contract.
//!
//! The upstream ETL collaborator promises a table with strictly increasing
//! timestamps, uniquely named columns, and the configured set of series.
//! [`DataError`] names the broken promise and carries enough context (row,
//! column, names) for the caller to fix the input.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

pub type DataResult<T> = Result<T, DataError>;

/// Unified error type for time-series table construction and selection.
#[derive(Debug, Clone, PartialEq)]
pub enum DataError {
    // ---- Shape ----
    /// Value matrix and timestamp/column metadata disagree in size.
    ShapeMismatch { rows: usize, cols: usize, timestamps: usize, columns: usize },

    /// Two columns share the same name.
    DuplicateColumn { name: String },

    // ---- Ordering ----
    /// Timestamp at `row` is not strictly after the one at `row - 1`.
    NonIncreasingTimestamps { row: usize },

    // ---- Values ----
    /// An infinite value; missing observations must be encoded as NaN.
    InfiniteValue { row: usize, column: String },

    // ---- Contract ----
    /// No columns were requested.
    NoColumns,

    /// Requested columns are absent from the table.
    MissingColumns { missing: Vec<String> },
}

impl std::error::Error for DataError {}

impl std::fmt::Display for DataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Shape ----
            DataError::ShapeMismatch { rows, cols, timestamps, columns } => write!(
                f,
                "Data Error: value matrix is {rows}×{cols} but {timestamps} timestamps and \
                 {columns} column names were supplied"
            ),
            DataError::DuplicateColumn { name } => {
                write!(f, "Data Error: duplicate column name {name:?}")
            }

            // ---- Ordering ----
            DataError::NonIncreasingTimestamps { row } => write!(
                f,
                "Data Error: timestamps must be strictly increasing (violated at row {row})"
            ),

            // ---- Values ----
            DataError::InfiniteValue { row, column } => {
                write!(f, "Data Error: infinite value at row {row}, column {column:?}")
            }

            // ---- Contract ----
            DataError::NoColumns => {
                write!(f, "Data Error: at least one column must be selected")
            }
            DataError::MissingColumns { missing } => {
                write!(f, "Data Error: missing columns in input table: {missing:?}")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<DataError> for PyErr {
    fn from(err: DataError) -> PyErr {
        match err {
            DataError::MissingColumns { .. } => {
                pyo3::exceptions::PyKeyError::new_err(err.to_string())
            }
            other => PyValueError::new_err(other.to_string()),
        }
    }
}
