//! svar — structural identification by sign restrictions.
//!
//! Purpose
//! -------
//! Map orthogonalized reduced-form impulse responses to sets of structural
//! responses that satisfy economically motivated sign restrictions, via
//! accept/reject sampling over random orthonormal rotations.
//!
//! Key behaviors
//! -------------
//! - [`SignRestrictions`] + [`violates`]: the restriction map and the pure
//!   acceptance predicate.
//! - [`IdentificationOptions`]: draw budget, target, bands, seeding.
//! - [`identify`]: the sampler; returns an [`Identification`] with accepted
//!   draws, attempt count, terminal state, and [`ResponseBands`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs are Cholesky-orthogonalized responses, so every rotation keeps
//!   the implied impact covariance equal to the reduced-form Σᵤ.
//! - Results are a deterministic function of (inputs, options, seed).

pub mod bands;
pub mod errors;
pub mod options;
pub mod restrictions;
pub mod sampler;

pub use self::bands::{ResponseBands, compute_bands, percentile_sorted};
pub use self::errors::{SvarError, SvarResult};
pub use self::options::{DEFAULT_BATCH_SIZE, IdentificationOptions};
pub use self::restrictions::{Sign, SignRestrictions, violates};
pub use self::sampler::{Identification, SamplerState, identify, rotate};
