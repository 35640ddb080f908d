//! linalg::rotation — random orthonormal matrices for rotation sampling.
//!
//! Purpose
//! -------
//! Draw k×k orthonormal matrices Q by QR-factorizing a matrix of i.i.d.
//! standard-normal entries. These rotations move between observationally
//! equivalent structural decompositions of a reduced-form covariance.
//!
//! Key behaviors
//! -------------
//! - [`RotationSampler::PlainQr`] returns the Q factor as produced by the
//!   Householder QR. Its distribution depends on the sign convention of
//!   the factorization and is not uniform over the orthogonal group.
//! - [`RotationSampler::Haar`] multiplies column j of Q by sign(Rⱼⱼ), which
//!   makes the draw Haar-uniform (Mezzadri, 2007).
//!
//! Invariants & assumptions
//! ------------------------
//! - Every returned matrix satisfies Q Qᵀ = I up to floating-point error.
//! - The Gaussian matrix is filled column-major, one draw per entry, so a
//!   given RNG state always produces the same rotation.
use crate::linalg::decomp::to_array2;
use nalgebra::DMatrix;
use ndarray::Array2;
use rand::Rng;
use rand_distr::StandardNormal;

/// RotationSampler — how the QR factor is turned into a rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotationSampler {
    /// Q from the QR factorization, unmodified.
    #[default]
    PlainQr,
    /// Q with columns sign-normalized by diag(R); Haar-uniform.
    Haar,
}

impl std::str::FromStr for RotationSampler {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "plain_qr" | "qr" | "plain" => Ok(RotationSampler::PlainQr),
            "haar" => Ok(RotationSampler::Haar),
            other => Err(format!("unknown rotation sampler {other:?} (expected 'plain_qr' or 'haar')")),
        }
    }
}

/// random_orthonormal — draw a k×k orthonormal matrix.
///
/// Parameters
/// ----------
/// - `k`: `usize`
///   Dimension of the rotation. `k = 0` yields an empty matrix.
/// - `sampler`: [`RotationSampler`]
///   Whether to apply the diag(R) sign correction.
/// - `rng`: `&mut R`
///   Source of the k² standard-normal draws.
///
/// Returns
/// -------
/// `Array2<f64>`
///   Orthonormal `k × k` matrix.
///
/// Examples
/// --------
/// ```rust
/// use rand::SeedableRng;
/// use rand_xoshiro::Xoshiro256PlusPlus;
/// use rust_svar::linalg::{RotationSampler, random_orthonormal};
///
/// let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
/// let q = random_orthonormal(3, RotationSampler::Haar, &mut rng);
/// let qqt = q.dot(&q.t());
/// for i in 0..3 {
///     for j in 0..3 {
///         let target = if i == j { 1.0 } else { 0.0 };
///         assert!((qqt[[i, j]] - target).abs() < 1e-12);
///     }
/// }
/// ```
pub fn random_orthonormal<R: Rng + ?Sized>(
    k: usize, sampler: RotationSampler, rng: &mut R,
) -> Array2<f64> {
    if k == 0 {
        return Array2::zeros((0, 0));
    }
    let gaussian = standard_normal_matrix(k, rng);
    let qr = gaussian.qr();
    let mut q = qr.q();
    if sampler == RotationSampler::Haar {
        let r = qr.r();
        for j in 0..k {
            if r[(j, j)] < 0.0 {
                q.column_mut(j).neg_mut();
            }
        }
    }
    to_array2(&q)
}

/// k×k matrix of i.i.d. N(0, 1) draws, filled column-major.
fn standard_normal_matrix<R: Rng + ?Sized>(k: usize, rng: &mut R) -> DMatrix<f64> {
    DMatrix::from_fn(k, k, |_, _| rng.sample::<f64, _>(StandardNormal))
}
