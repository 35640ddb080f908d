//! utils — conversion helpers for the PyO3 boundary.
//!
//! Everything here is compiled only with the `python-bindings` feature and
//! turns Python objects (numpy arrays, pandas frames, dicts, strings) into
//! the validated Rust types used by the core modules.

#[cfg(feature = "python-bindings")]
use ndarray::{Array2, Array3};

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyTypeError, exceptions::PyValueError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use std::collections::BTreeMap;

#[cfg(feature = "python-bindings")]
use crate::{linalg::RotationSampler, svar::SignRestrictions};

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArrayMethods, PyReadonlyArray1, PyReadonlyArray2, PyReadonlyArray3};

/// Borrow a contiguous 1-D float64 view of an array-like (ndarray, Series,
/// or sequence), copying only when the input is not already contiguous.
#[cfg(feature = "python-bindings")]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        PyTypeError::new_err("expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64")
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

/// Copy a 2-D float64 array-like (ndarray, DataFrame, nested sequence) into
/// an owned `Array2<f64>`.
#[cfg(feature = "python-bindings")]
pub fn extract_f64_matrix<'py>(raw_data: &Bound<'py, PyAny>) -> PyResult<Array2<f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray2<f64>>() {
        return Ok(arr_ro.as_array().to_owned());
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (), None) {
        if let Ok(frame_ro) = obj.extract::<PyReadonlyArray2<f64>>() {
            return Ok(frame_ro.as_array().to_owned());
        }
    }

    let rows: Vec<Vec<f64>> = raw_data.extract().map_err(|_| {
        PyTypeError::new_err("expected a 2-D numpy.ndarray, pandas.DataFrame, or nested sequence of float64")
    })?;
    let n_cols = rows.first().map_or(0, Vec::len);
    if rows.iter().any(|r| r.len() != n_cols) {
        return Err(PyValueError::new_err("rows of the input sequence have different lengths"));
    }
    let flat: Vec<f64> = rows.into_iter().flatten().collect();
    let n_rows = if n_cols == 0 { 0 } else { flat.len() / n_cols };
    Array2::from_shape_vec((n_rows, n_cols), flat)
        .map_err(|e| PyValueError::new_err(format!("invalid matrix shape: {e}")))
}

/// Copy a 3-D float64 numpy array into an owned `Array3<f64>`.
#[cfg(feature = "python-bindings")]
pub fn extract_f64_tensor3<'py>(raw_data: &Bound<'py, PyAny>) -> PyResult<Array3<f64>> {
    let arr_ro = raw_data
        .extract::<PyReadonlyArray3<f64>>()
        .map_err(|_| PyTypeError::new_err("expected a 3-D numpy.ndarray of float64"))?;
    Ok(arr_ro.as_array().to_owned())
}

/// Parse `{variable: {shock: ±1}}` into [`SignRestrictions`].
#[cfg(feature = "python-bindings")]
pub fn extract_sign_restrictions<'py>(
    signs: &Bound<'py, PyAny>, check_horizons: usize,
) -> PyResult<SignRestrictions> {
    let map: BTreeMap<usize, BTreeMap<usize, i64>> = signs.extract().map_err(|_| {
        PyTypeError::new_err("signs must be a dict[int, dict[int, int]] of +1/-1 codes")
    })?;
    let codes = map
        .into_iter()
        .flat_map(|(v, shocks)| shocks.into_iter().map(move |(s, code)| (v, s, code)));
    Ok(SignRestrictions::from_codes(codes, check_horizons)?)
}

#[cfg(feature = "python-bindings")]
pub fn extract_rotation_sampler(sampler: Option<&str>) -> PyResult<RotationSampler> {
    match sampler {
        None => Ok(RotationSampler::default()),
        Some(name) => name.parse::<RotationSampler>().map_err(PyValueError::new_err),
    }
}
