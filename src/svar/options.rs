//! svar::options — configuration of the rotation sampler.
//!
//! [`IdentificationOptions`] bundles the draw budget, the stopping target,
//! band percentiles, seeding, and execution choices. Construct it with
//! [`IdentificationOptions::new`] (validated) or start from `Default` and
//! override fields; [`crate::svar::identify`] re-validates either way.
use crate::linalg::RotationSampler;
use crate::svar::errors::{SvarError, SvarResult};

/// Draws evaluated per batch before results are merged in index order.
pub const DEFAULT_BATCH_SIZE: usize = 256;

/// IdentificationOptions — budgets and output settings for sign-restricted
/// identification.
///
/// Fields
/// ------
/// - `max_draws`: `usize`
///   Maximum rotations attempted.
/// - `target_accepted`: `usize`
///   Stop as soon as this many draws are accepted. 0 returns an empty
///   result without drawing.
/// - `lower_pct`, `upper_pct`: `f64`
///   Band percentiles in [0, 100], `lower < upper`.
/// - `seed`: `Option<u64>`
///   Base seed; draw i is generated from (seed, i). `None` draws a base
///   seed from system entropy (reported on the result).
/// - `sampler`: [`RotationSampler`]
///   Plain QR (default) or Haar-corrected rotations.
/// - `batch_size`: `usize`
///   Draws evaluated per batch (≥ 1). Does not affect results.
/// - `parallel`: `bool`
///   Evaluate batches on the rayon pool when the `parallel` feature is
///   enabled; ignored otherwise. Does not affect results.
///
/// Notes
/// -----
/// - Defaults: 20 000 draws, 200 accepted, 5th/95th percentiles, no seed,
///   plain QR, batches of [`DEFAULT_BATCH_SIZE`], parallel on.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentificationOptions {
    pub max_draws: usize,
    pub target_accepted: usize,
    pub lower_pct: f64,
    pub upper_pct: f64,
    pub seed: Option<u64>,
    pub sampler: RotationSampler,
    pub batch_size: usize,
    pub parallel: bool,
}

impl IdentificationOptions {
    /// Validated options with default sampler, batch size, and parallelism.
    ///
    /// Errors
    /// ------
    /// - `SvarError::InvalidPercentiles` unless `0 ≤ lower < upper ≤ 100`.
    pub fn new(
        max_draws: usize, target_accepted: usize, lower_pct: f64, upper_pct: f64,
        seed: Option<u64>,
    ) -> SvarResult<Self> {
        let opts = IdentificationOptions {
            max_draws,
            target_accepted,
            lower_pct,
            upper_pct,
            seed,
            ..IdentificationOptions::default()
        };
        opts.validate()?;
        Ok(opts)
    }

    pub fn with_sampler(mut self, sampler: RotationSampler) -> Self {
        self.sampler = sampler;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn validate(&self) -> SvarResult<()> {
        let (lower, upper) = (self.lower_pct, self.upper_pct);
        if !(0.0..=100.0).contains(&lower) || !(0.0..=100.0).contains(&upper) || lower >= upper {
            return Err(SvarError::InvalidPercentiles { lower, upper });
        }
        if self.batch_size == 0 {
            return Err(SvarError::InvalidBatchSize);
        }
        Ok(())
    }
}

impl Default for IdentificationOptions {
    fn default() -> Self {
        IdentificationOptions {
            max_draws: 20_000,
            target_accepted: 200,
            lower_pct: 5.0,
            upper_pct: 95.0,
            seed: None,
            sampler: RotationSampler::PlainQr,
            batch_size: DEFAULT_BATCH_SIZE,
            parallel: true,
        }
    }
}
