//! svar::sampler — accept/reject search over orthonormal rotations.
//!
//! Purpose
//! -------
//! Given an orthogonalized response tensor Θ (`(H + 1) × k × k`), repeatedly
//! draw an orthonormal Q, form the candidate structural responses
//! Θₕ Q for every horizon, and keep the candidates that satisfy every sign
//! restriction. Summarize the accepted set with median and percentile bands.
//!
//! Key behaviors
//! -------------
//! - State machine INIT → SAMPLING → (ACCEPTED | EXHAUSTED): sampling stops
//!   when `target_accepted` draws were accepted or `max_draws` were tried.
//! - Draw i is generated by an RNG seeded from (seed, i), so results do not
//!   depend on batch size or on whether batches run in parallel.
//! - Each batch is fully collected and then merged in draw-index order;
//!   merging stops at the draw that reaches the target, so `attempts`
//!   counts exactly the draws a sequential loop would have made.
//! - Bands are computed only after sampling has stopped.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every accepted draw satisfies all restrictions exactly.
//! - `target_accepted = 0` returns an empty, successful result and makes no
//!   draws.
//! - Zero accepted draws after sampling is `SvarError::NoAcceptedDraws`.
use crate::linalg::random_orthonormal;
use crate::svar::bands::{ResponseBands, compute_bands};
use crate::svar::errors::{SvarError, SvarResult};
use crate::svar::options::IdentificationOptions;
use crate::svar::restrictions::{SignRestrictions, violates};
use ndarray::{Array2, Array3, Array4, ArrayView3, Axis, s};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use tracing::{debug, info};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Lifecycle of the rejection sampler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplerState {
    Init,
    Sampling,
    /// Target number of accepted draws reached.
    Accepted,
    /// Draw budget spent before reaching the target.
    Exhausted,
}

/// Identification — accepted structural responses and their summary.
///
/// Fields
/// ------
/// - `draws`: accepted `(H + 1) × k × k` tensors, in draw order.
/// - `attempts`: rotations tried.
/// - `status`: terminal [`SamplerState`] (`Accepted` or `Exhausted`).
/// - `bands`: median / lower / upper tensors; `None` only when no draws were
///   requested.
/// - `seed`: effective base seed.
#[derive(Debug, Clone, PartialEq)]
pub struct Identification {
    pub draws: Vec<Array3<f64>>,
    pub attempts: usize,
    pub status: SamplerState,
    pub bands: Option<ResponseBands>,
    pub seed: u64,
}

impl Identification {
    pub fn accepted(&self) -> usize {
        self.draws.len()
    }

    /// Accepted draws stacked as `n_accepted × (H + 1) × k × k`.
    pub fn stacked_draws(&self) -> Array4<f64> {
        match self.draws.first() {
            None => Array4::zeros((0, 0, 0, 0)),
            Some(first) => {
                let (h, k, m) = first.dim();
                let mut out = Array4::<f64>::zeros((self.draws.len(), h, k, m));
                for (mut slot, draw) in out.axis_iter_mut(Axis(0)).zip(&self.draws) {
                    slot.assign(draw);
                }
                out
            }
        }
    }
}

/// identify — sign-restricted identification by rotation sampling.
///
/// Parameters
/// ----------
/// - `responses`: `ArrayView3<f64>`
///   Orthogonalized reduced-form responses, `(H + 1) × k × k`.
/// - `restrictions`: [`SignRestrictions`]
/// - `opts`: [`IdentificationOptions`]
///
/// Returns
/// -------
/// `SvarResult<Identification>`
///
/// Errors
/// ------
/// - `SvarError::InvalidResponseShape`, `InvalidRestriction`,
///   `InvalidCheckHorizons`, `InvalidPercentiles`, `InvalidBatchSize` for
///   malformed input.
/// - `SvarError::NoAcceptedDraws { attempts }` if sampling ends with no
///   accepted draw (including `max_draws = 0` with a positive target).
///
/// Examples
/// --------
/// ```rust
/// use ndarray::Array3;
/// use rust_svar::svar::{IdentificationOptions, SignRestrictions, Sign, identify};
///
/// let mut irf = Array3::<f64>::zeros((3, 2, 2));
/// irf[[0, 0, 0]] = 1.0;
/// irf[[0, 1, 1]] = 1.0;
/// let restrictions = SignRestrictions::new(1).with(0, 0, Sign::Positive);
/// let opts = IdentificationOptions::new(500, 20, 5.0, 95.0, Some(7)).unwrap();
///
/// let out = identify(irf.view(), &restrictions, &opts).unwrap();
/// assert_eq!(out.accepted(), 20);
/// assert!(out.draws.iter().all(|d| d[[0, 0, 0]] > 0.0));
/// ```
pub fn identify(
    responses: ArrayView3<'_, f64>, restrictions: &SignRestrictions, opts: &IdentificationOptions,
) -> SvarResult<Identification> {
    let (n_h, k, n_shocks) = responses.dim();
    if n_h == 0 || k == 0 || k != n_shocks {
        return Err(SvarError::InvalidResponseShape { shape: (n_h, k, n_shocks) });
    }
    restrictions.validate(n_h, k)?;
    opts.validate()?;

    let seed = opts.seed.unwrap_or_else(|| rand::rng().random());
    let mut state = SamplerState::Init;
    let mut attempts = 0usize;
    let mut draws: Vec<Array3<f64>> = Vec::with_capacity(opts.target_accepted.min(opts.max_draws));

    if opts.target_accepted == 0 {
        return Ok(Identification {
            draws,
            attempts,
            status: SamplerState::Accepted,
            bands: None,
            seed,
        });
    }

    debug!(state = ?state, max_draws = opts.max_draws, target = opts.target_accepted, seed, "starting sampler");
    state = SamplerState::Sampling;
    while state == SamplerState::Sampling {
        if draws.len() >= opts.target_accepted {
            state = SamplerState::Accepted;
            continue;
        }
        if attempts >= opts.max_draws {
            state = SamplerState::Exhausted;
            continue;
        }

        let start = attempts;
        let end = (start + opts.batch_size).min(opts.max_draws);
        let batch = evaluate_batch(responses, restrictions, opts, seed, start..end);
        let before = draws.len();
        for candidate in batch {
            attempts += 1;
            if let Some(rotated) = candidate {
                draws.push(rotated);
                if draws.len() == opts.target_accepted {
                    break;
                }
            }
        }
        debug!(start, end, accepted_in_batch = draws.len() - before, total = draws.len(), "sampled batch");
    }

    info!(
        attempts,
        accepted = draws.len(),
        target = opts.target_accepted,
        status = ?state,
        "sign-restriction sampling finished"
    );
    if draws.is_empty() {
        return Err(SvarError::NoAcceptedDraws { attempts });
    }

    let bands = compute_bands(&draws, opts.lower_pct, opts.upper_pct);
    Ok(Identification { draws, attempts, status: state, bands, seed })
}

/// rotate — structural candidate Θₕ Q for every horizon.
pub fn rotate(responses: ArrayView3<'_, f64>, q: &Array2<f64>) -> Array3<f64> {
    let mut out = Array3::<f64>::zeros(responses.dim());
    for h in 0..responses.len_of(Axis(0)) {
        let theta_h = responses.index_axis(Axis(0), h);
        out.slice_mut(s![h, .., ..]).assign(&theta_h.dot(q));
    }
    out
}

//
// ---------- Private helpers ----------
//

/// Counter-based SplitMix64 seed for draw `counter`.
#[inline]
fn counter_rng_seed(base_seed: u64, counter: u64) -> u64 {
    let mut z = base_seed.wrapping_add(counter.wrapping_mul(0x9e3779b97f4a7c15));
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}

fn evaluate_draw(
    responses: ArrayView3<'_, f64>, restrictions: &SignRestrictions, opts: &IdentificationOptions,
    seed: u64, index: usize,
) -> Option<Array3<f64>> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(counter_rng_seed(seed, index as u64));
    let q = random_orthonormal(responses.len_of(Axis(1)), opts.sampler, &mut rng);
    let rotated = rotate(responses, &q);
    (!violates(rotated.view(), restrictions)).then_some(rotated)
}

/// Evaluate draws `range` and return their outcomes in index order.
fn evaluate_batch(
    responses: ArrayView3<'_, f64>, restrictions: &SignRestrictions, opts: &IdentificationOptions,
    seed: u64, range: std::ops::Range<usize>,
) -> Vec<Option<Array3<f64>>> {
    #[cfg(feature = "parallel")]
    {
        if opts.parallel {
            return range
                .into_par_iter()
                .map(|i| evaluate_draw(responses, restrictions, opts, seed, i))
                .collect();
        }
    }
    range.map(|i| evaluate_draw(responses, restrictions, opts, seed, i)).collect()
}
