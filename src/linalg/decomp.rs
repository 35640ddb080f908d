//! linalg::decomp — Cholesky, least squares, and ndarray/nalgebra bridging.
//!
//! Purpose
//! -------
//! Keep the `ndarray` public surface while delegating factorizations to
//! `nalgebra`. The copies are explicit and element-wise so that row-major
//! `ndarray` data and column-major `DMatrix` storage never get confused.
//!
//! Key behaviors
//! -------------
//! - [`to_dmatrix`] / [`to_array2`] convert between the two matrix types.
//! - [`lower_cholesky`] returns the lower factor L with Σ = L Lᵀ, or `None`
//!   when Σ is not (numerically) positive definite.
//! - [`least_squares`] solves min ‖Z B − Y‖ by SVD with a relative
//!   singular-value cutoff, matching a pseudo-inverse OLS solution.
use nalgebra::DMatrix;
use ndarray::{Array2, ArrayView2};

/// Copy an `ndarray` view into a freshly allocated `DMatrix`.
pub fn to_dmatrix(a: ArrayView2<'_, f64>) -> DMatrix<f64> {
    DMatrix::from_fn(a.nrows(), a.ncols(), |i, j| a[[i, j]])
}

/// Copy a `DMatrix` back into a row-major `Array2`.
pub fn to_array2(m: &DMatrix<f64>) -> Array2<f64> {
    Array2::from_shape_fn((m.nrows(), m.ncols()), |(i, j)| m[(i, j)])
}

/// lower_cholesky — lower-triangular Cholesky factor of a covariance.
///
/// Parameters
/// ----------
/// - `sigma`: `ArrayView2<f64>`
///   Square, symmetric matrix. Only the lower triangle is read.
///
/// Returns
/// -------
/// `Option<Array2<f64>>`
///   `Some(L)` with L lower triangular, positive diagonal, and `L Lᵀ = Σ`;
///   `None` when `sigma` is not square, contains non-finite entries, or is
///   not positive definite.
///
/// Examples
/// --------
/// ```rust
/// # use ndarray::array;
/// # use rust_svar::linalg::lower_cholesky;
/// let sigma = array![[4.0, 2.0], [2.0, 2.0]];
/// let l = lower_cholesky(sigma.view()).unwrap();
/// assert!((l[[0, 0]] - 2.0).abs() < 1e-12);
/// assert!((l[[1, 0]] - 1.0).abs() < 1e-12);
/// assert!((l[[1, 1]] - 1.0).abs() < 1e-12);
/// assert_eq!(l[[0, 1]], 0.0);
/// ```
pub fn lower_cholesky(sigma: ArrayView2<'_, f64>) -> Option<Array2<f64>> {
    if sigma.nrows() != sigma.ncols() || sigma.iter().any(|v| !v.is_finite()) {
        return None;
    }
    to_dmatrix(sigma).cholesky().map(|chol| to_array2(&chol.l()))
}

/// least_squares — minimum-norm solution of Z B ≈ Y.
///
/// Parameters
/// ----------
/// - `z`: `ArrayView2<f64>`
///   `n × m` design matrix.
/// - `y`: `ArrayView2<f64>`
///   `n × k` response matrix.
///
/// Returns
/// -------
/// `Option<Array2<f64>>`
///   `m × k` coefficient matrix, or `None` if the shapes disagree or the
///   SVD solve fails (e.g. a design with no non-negligible singular value).
///
/// Notes
/// -----
/// - Singular values below `max(σ) · max(n, m) · ε` are treated as zero,
///   the usual pseudo-inverse tolerance.
pub fn least_squares(z: ArrayView2<'_, f64>, y: ArrayView2<'_, f64>) -> Option<Array2<f64>> {
    if z.nrows() != y.nrows() || z.nrows() == 0 || z.ncols() == 0 {
        return None;
    }
    let z_nalg = to_dmatrix(z);
    let y_nalg = to_dmatrix(y);
    let svd = z_nalg.svd(true, true);
    let sv_max = svd.singular_values.max();
    if !(sv_max > 0.0) || !sv_max.is_finite() {
        return None;
    }
    let eps = sv_max * (z.nrows().max(z.ncols()) as f64) * f64::EPSILON;
    svd.solve(&y_nalg, eps).ok().map(|b| to_array2(&b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Lossless ndarray ↔ DMatrix copies for non-square shapes.
    // - Cholesky reconstruction and rejection of indefinite matrices.
    // - Exact recovery of coefficients in a noiseless regression.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify the two copy helpers are inverse to each other on a
    // rectangular matrix (guards against row/column-major mix-ups).
    //
    // Given
    // -----
    // - A 2×3 matrix with distinct entries.
    //
    // Expect
    // ------
    // - `to_array2(to_dmatrix(a)) == a` and `m[(1, 2)] == a[[1, 2]]`.
    fn to_dmatrix_and_back_round_trip_rectangular() {
        // Arrange
        let a = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];

        // Act
        let m = to_dmatrix(a.view());
        let back = to_array2(&m);

        // Assert
        assert_eq!(m[(1, 2)], 6.0);
        assert_eq!(back, a);
    }

    #[test]
    // Purpose
    // -------
    // Check that L Lᵀ reproduces Σ for a positive-definite 3×3 matrix.
    //
    // Given
    // -----
    // - A symmetric diagonally dominant Σ.
    //
    // Expect
    // ------
    // - L is lower triangular and L Lᵀ = Σ within 1e-12.
    fn lower_cholesky_reconstructs_positive_definite_matrix() {
        // Arrange
        let sigma = array![[2.0, 0.3, -0.2], [0.3, 1.5, 0.1], [-0.2, 0.1, 1.0]];

        // Act
        let l = lower_cholesky(sigma.view()).expect("Σ is positive definite");

        // Assert
        assert_eq!(l[[0, 1]], 0.0);
        assert_eq!(l[[0, 2]], 0.0);
        assert_eq!(l[[1, 2]], 0.0);
        let recon = l.dot(&l.t());
        for (a, b) in recon.iter().zip(sigma.iter()) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-12);
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure indefinite or non-finite matrices yield `None`.
    //
    // Given
    // -----
    // - An indefinite symmetric matrix and one containing NaN.
    //
    // Expect
    // ------
    // - `lower_cholesky` returns `None` for both.
    fn lower_cholesky_rejects_indefinite_and_non_finite() {
        // Arrange
        let indefinite = array![[1.0, 2.0], [2.0, 1.0]];
        let with_nan = array![[1.0, f64::NAN], [f64::NAN, 1.0]];

        // Act & Assert
        assert!(lower_cholesky(indefinite.view()).is_none());
        assert!(lower_cholesky(with_nan.view()).is_none());
    }

    #[test]
    // Purpose
    // -------
    // Verify exact coefficient recovery on a noiseless linear model.
    //
    // Given
    // -----
    // - Z = [1, x] with x = 0..5 and Y = 2 + 3x.
    //
    // Expect
    // ------
    // - B ≈ [2, 3]ᵀ.
    fn least_squares_recovers_noiseless_coefficients() {
        // Arrange
        let z = Array2::from_shape_fn((6, 2), |(t, j)| if j == 0 { 1.0 } else { t as f64 });
        let y = Array2::from_shape_fn((6, 1), |(t, _)| 2.0 + 3.0 * t as f64);

        // Act
        let b = least_squares(z.view(), y.view()).expect("well-posed regression");

        // Assert
        assert_abs_diff_eq!(b[[0, 0]], 2.0, epsilon = 1e-10);
        assert_abs_diff_eq!(b[[1, 0]], 3.0, epsilon = 1e-10);
    }
}
