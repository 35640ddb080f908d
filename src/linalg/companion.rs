//! linalg::companion — companion form and stability of VAR(p) dynamics.
//!
//! Purpose
//! -------
//! Stack the p lag matrices of a VAR into its first-order companion form
//!
//! ```text
//!     ┌ A₁  A₂  …  Aₚ₋₁  Aₚ ┐
//!     │ I   0   …  0     0  │
//! F = │ 0   I   …  0     0  │      (kp × kp)
//!     │ ⋮            ⋱      │
//!     └ 0   0   …  I     0  ┘
//! ```
//!
//! and judge stability from the moduli of its eigenvalues: the process is
//! stable iff every |λ| < 1.
//!
//! Invariants & assumptions
//! ------------------------
//! - All coefficient matrices are `k × k` with a common k.
//! - The eigen solver is a real Schur decomposition with a bounded iteration
//!   count; failure to converge is reported as "not stable" rather than an
//!   error.
use crate::linalg::decomp::to_dmatrix;
use nalgebra::linalg::Schur;
use ndarray::{Array2, ArrayView2, s};

/// Maximum QR sweeps allowed in the Schur decomposition.
const SCHUR_MAX_ITER: usize = 10_000;

/// companion_matrix — build the kp×kp companion form from p lag matrices.
///
/// Parameters
/// ----------
/// - `coefs`: `&[Array2<f64>]`
///   Lag matrices A₁,…,Aₚ, each `k × k`.
///
/// Returns
/// -------
/// `Array2<f64>`
///   The `kp × kp` companion matrix; an empty `0 × 0` matrix when `coefs`
///   is empty.
///
/// Panics
/// ------
/// - If the lag matrices do not share a square `k × k` shape
///   (a programming error upstream of the estimator).
///
/// Examples
/// --------
/// ```rust
/// # use ndarray::array;
/// # use rust_svar::linalg::companion_matrix;
/// let a1 = array![[0.5, 0.1], [0.0, 0.3]];
/// let a2 = array![[0.2, 0.0], [0.1, 0.1]];
/// let f = companion_matrix(&[a1, a2]);
/// assert_eq!(f.dim(), (4, 4));
/// assert_eq!(f[[0, 2]], 0.2);
/// assert_eq!(f[[2, 0]], 1.0);
/// ```
pub fn companion_matrix(coefs: &[Array2<f64>]) -> Array2<f64> {
    let p = coefs.len();
    if p == 0 {
        return Array2::zeros((0, 0));
    }
    let k = coefs[0].nrows();
    let kp = k * p;
    let mut companion = Array2::<f64>::zeros((kp, kp));
    for (lag, a) in coefs.iter().enumerate() {
        companion.slice_mut(s![0..k, lag * k..(lag + 1) * k]).assign(a);
    }
    for i in k..kp {
        companion[[i, i - k]] = 1.0;
    }
    companion
}

/// eigenvalue_moduli — |λ| for every eigenvalue of a square matrix.
///
/// Returns `None` when the Schur iteration fails to converge or the input
/// contains non-finite entries. Moduli are returned in solver order.
pub fn eigenvalue_moduli(companion: ArrayView2<'_, f64>) -> Option<Vec<f64>> {
    if companion.nrows() != companion.ncols() || companion.iter().any(|v| !v.is_finite()) {
        return None;
    }
    if companion.nrows() == 0 {
        return Some(Vec::new());
    }
    let schur = Schur::try_new(to_dmatrix(companion), f64::EPSILON, SCHUR_MAX_ITER)?;
    Some(schur.complex_eigenvalues().iter().map(|z| z.norm()).collect())
}

/// is_stable — true iff every companion eigenvalue has modulus < 1.
///
/// Never raises: an ill-conditioned matrix whose eigenvalues cannot be
/// computed is reported as not stable.
pub fn is_stable(companion: ArrayView2<'_, f64>) -> bool {
    match eigenvalue_moduli(companion) {
        Some(moduli) => moduli.iter().all(|&m| m < 1.0),
        None => false,
    }
}
