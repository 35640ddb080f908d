//! data::table — aligned, timestamped multivariate series.
//!
//! Purpose
//! -------
//! Provide the in-memory contract between the (external) ETL stage and the
//! VAR pipeline: one timestamp per row, one named column per series, and a
//! dense `f64` value matrix.
//!
//! Key behaviors
//! -------------
//! - [`TimeSeriesTable::new`] enforces matching shapes, unique column names,
//!   strictly increasing timestamps, and the absence of ±∞. NaN is accepted
//!   as the missing-value marker.
//! - [`TimeSeriesTable::select`] projects onto a configured column list in
//!   the requested order, reports every absent name at once, and drops rows
//!   with a missing value in any selected column.
//!
//! Invariants & assumptions
//! ------------------------
//! - Column order of a selected table is the variable order, and therefore
//!   the shock order, of every downstream model.
//! - A table returned by `select` contains no NaN.
//!
//! Conventions
//! -----------
//! - Timestamps are calendar dates (`chrono::NaiveDate`); monthly data uses
//!   the first day of the month.
//! - Rows index time, columns index variables.
use crate::data::errors::{DataError, DataResult};
use chrono::NaiveDate;
use ndarray::{Array2, ArrayView2, Axis};
use std::collections::HashSet;

/// `TimeSeriesTable` — validated, aligned multivariate time series.
///
/// Fields
/// ------
/// - `timestamps`: `Vec<NaiveDate>`
///   Strictly increasing row labels.
/// - `columns`: `Vec<String>`
///   Unique column names; order defines variable order.
/// - `values`: `Array2<f64>`
///   `rows × columns` observations; finite or NaN (missing).
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesTable {
    timestamps: Vec<NaiveDate>,
    columns: Vec<String>,
    values: Array2<f64>,
}

impl TimeSeriesTable {
    /// Construct a validated table.
    ///
    /// Errors
    /// ------
    /// - `DataError::ShapeMismatch` if `values` is not
    ///   `timestamps.len() × columns.len()`.
    /// - `DataError::DuplicateColumn` for a repeated name.
    /// - `DataError::NonIncreasingTimestamps` at the first out-of-order row.
    /// - `DataError::InfiniteValue` at the first ±∞ entry.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// use chrono::NaiveDate;
    /// use ndarray::array;
    /// use rust_svar::data::TimeSeriesTable;
    ///
    /// let dates = vec![
    ///     NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
    ///     NaiveDate::from_ymd_opt(2000, 2, 1).unwrap(),
    ///     NaiveDate::from_ymd_opt(2000, 3, 1).unwrap(),
    /// ];
    /// let table = TimeSeriesTable::new(
    ///     dates,
    ///     vec!["a".to_string(), "b".to_string()],
    ///     array![[1.0, 2.0], [f64::NAN, 3.0], [4.0, 5.0]],
    /// )
    /// .unwrap();
    ///
    /// let selected = table.select(&["b", "a"]).unwrap();
    /// assert_eq!(selected.nobs(), 2);
    /// assert_eq!(selected.values()[[0, 0]], 2.0);
    /// ```
    pub fn new(
        timestamps: Vec<NaiveDate>, columns: Vec<String>, values: Array2<f64>,
    ) -> DataResult<Self> {
        let (rows, cols) = values.dim();
        if rows != timestamps.len() || cols != columns.len() {
            return Err(DataError::ShapeMismatch {
                rows,
                cols,
                timestamps: timestamps.len(),
                columns: columns.len(),
            });
        }

        let mut seen = HashSet::with_capacity(columns.len());
        for name in &columns {
            if !seen.insert(name.as_str()) {
                return Err(DataError::DuplicateColumn { name: name.clone() });
            }
        }

        if let Some(row) = timestamps.windows(2).position(|w| w[1] <= w[0]) {
            return Err(DataError::NonIncreasingTimestamps { row: row + 1 });
        }

        for ((row, col), value) in values.indexed_iter() {
            if value.is_infinite() {
                return Err(DataError::InfiniteValue { row, column: columns[col].clone() });
            }
        }

        Ok(TimeSeriesTable { timestamps, columns, values })
    }

    /// Project onto `names` (in that order) and drop incomplete rows.
    ///
    /// Errors
    /// ------
    /// - `DataError::NoColumns` if `names` is empty.
    /// - `DataError::MissingColumns` listing every requested name that is
    ///   absent, in request order.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> DataResult<TimeSeriesTable> {
        if names.is_empty() {
            return Err(DataError::NoColumns);
        }
        let mut indices = Vec::with_capacity(names.len());
        let mut missing = Vec::new();
        for name in names {
            match self.column_index(name.as_ref()) {
                Some(idx) => indices.push(idx),
                None => missing.push(name.as_ref().to_string()),
            }
        }
        if !missing.is_empty() {
            return Err(DataError::MissingColumns { missing });
        }

        let projected = self.values.select(Axis(1), &indices);
        let keep: Vec<usize> = projected
            .axis_iter(Axis(0))
            .enumerate()
            .filter(|(_, row)| row.iter().all(|v| !v.is_nan()))
            .map(|(t, _)| t)
            .collect();

        Ok(TimeSeriesTable {
            timestamps: keep.iter().map(|&t| self.timestamps[t]).collect(),
            columns: names.iter().map(|n| n.as_ref().to_string()).collect(),
            values: projected.select(Axis(0), &keep),
        })
    }

    /// Position of `name` among the columns.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Number of rows.
    pub fn nobs(&self) -> usize {
        self.values.nrows()
    }

    /// Number of columns (variables).
    pub fn n_vars(&self) -> usize {
        self.values.ncols()
    }

    pub fn timestamps(&self) -> &[NaiveDate] {
        &self.timestamps
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> ArrayView2<'_, f64> {
        self.values.view()
    }
}
