//! linalg — small dense linear-algebra kernels for VAR analysis.
//!
//! Purpose
//! -------
//! Provide the matrix routines shared by estimation, impulse-response
//! computation, and sign-restricted identification:
//!
//! - companion-form construction and the eigenvalue-modulus stability test
//!   ([`companion`]),
//! - random orthonormal rotations drawn by QR of Gaussian matrices
//!   ([`rotation`]),
//! - Cholesky factors, SVD least squares, and the `ndarray` ↔ `nalgebra`
//!   bridge ([`decomp`]).
//!
//! Conventions
//! -----------
//! - Public inputs and outputs are `ndarray` types; `nalgebra` is used
//!   internally for decompositions only.
//! - Numerical breakdowns are reported as `None`/`false` verdicts, never
//!   panics. Callers decide whether a missing factor is fatal.

pub mod companion;
pub mod decomp;
pub mod rotation;

pub use self::companion::{companion_matrix, eigenvalue_moduli, is_stable};
pub use self::decomp::{least_squares, lower_cholesky};
pub use self::rotation::{RotationSampler, random_orthonormal};
