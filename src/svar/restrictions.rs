//! svar::restrictions — sign restrictions on structural impulse responses.
//!
//! Purpose
//! -------
//! Describe which (variable, shock) responses must be strictly positive or
//! strictly negative over the first few horizons, and decide whether a
//! candidate response tensor violates any of them.
//!
//! Conventions
//! -----------
//! - Rules are keyed `variable → shock → sign`, matching the tensor index
//!   `[horizon][variable][shock]`.
//! - Horizons 0..`check_horizons` are checked; `check_horizons = 0` imposes
//!   nothing.
//! - A zero or NaN response satisfies neither sign.
use crate::svar::errors::{SvarError, SvarResult};
use ndarray::ArrayView3;
use std::collections::BTreeMap;

/// Required sign of a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    /// True iff `value` has exactly this sign.
    #[inline]
    pub fn holds(self, value: f64) -> bool {
        match self {
            Sign::Positive => value > 0.0,
            Sign::Negative => value < 0.0,
        }
    }
}

impl TryFrom<i64> for Sign {
    type Error = SvarError;

    fn try_from(code: i64) -> SvarResult<Self> {
        match code {
            1 => Ok(Sign::Positive),
            -1 => Ok(Sign::Negative),
            _ => Err(SvarError::InvalidSign { code }),
        }
    }
}

/// SignRestrictions — the restriction map plus the checked horizon count.
///
/// Fields
/// ------
/// - `rules`: `BTreeMap<usize, BTreeMap<usize, Sign>>`
///   variable → shock → required sign. Ordered maps keep the check order
///   deterministic.
/// - `check_horizons`: `usize`
///   Number of leading horizons (0..check_horizons) that must satisfy every
///   rule.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SignRestrictions {
    rules: BTreeMap<usize, BTreeMap<usize, Sign>>,
    check_horizons: usize,
}

impl SignRestrictions {
    /// Empty restriction set checking `check_horizons` horizons.
    pub fn new(check_horizons: usize) -> Self {
        SignRestrictions { rules: BTreeMap::new(), check_horizons }
    }

    /// Add (or replace) the rule for `(variable, shock)`.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// use rust_svar::svar::{Sign, SignRestrictions};
    ///
    /// let r = SignRestrictions::new(1)
    ///     .with(0, 0, Sign::Negative)
    ///     .with(0, 1, Sign::Positive);
    /// assert_eq!(r.len(), 2);
    /// ```
    pub fn with(mut self, variable: usize, shock: usize, sign: Sign) -> Self {
        self.rules.entry(variable).or_default().insert(shock, sign);
        self
    }

    /// Build from integer sign codes (+1 / −1), e.g. as read from a config.
    ///
    /// Errors
    /// ------
    /// - `SvarError::InvalidSign` for any other code.
    pub fn from_codes<I>(codes: I, check_horizons: usize) -> SvarResult<Self>
    where
        I: IntoIterator<Item = (usize, usize, i64)>,
    {
        codes.into_iter().try_fold(SignRestrictions::new(check_horizons), |acc, (v, s, code)| {
            Ok(acc.with(v, s, Sign::try_from(code)?))
        })
    }

    pub fn check_horizons(&self) -> usize {
        self.check_horizons
    }

    /// Number of (variable, shock) rules.
    pub fn len(&self) -> usize {
        self.rules.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate rules as `(variable, shock, sign)` in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Sign)> + '_ {
        self.rules
            .iter()
            .flat_map(|(&v, shocks)| shocks.iter().map(move |(&s, &sign)| (v, s, sign)))
    }

    /// Check that every rule fits a `n_horizons × k × k` tensor.
    ///
    /// Errors
    /// ------
    /// - `SvarError::InvalidRestriction` for an index ≥ k.
    /// - `SvarError::InvalidCheckHorizons` if `check_horizons > n_horizons`.
    pub fn validate(&self, n_horizons: usize, k: usize) -> SvarResult<()> {
        if let Some((variable, shock, _)) = self.iter().find(|&(v, s, _)| v >= k || s >= k) {
            return Err(SvarError::InvalidRestriction { variable, shock, n_vars: k });
        }
        if self.check_horizons > n_horizons {
            return Err(SvarError::InvalidCheckHorizons {
                check_horizons: self.check_horizons,
                available: n_horizons,
            });
        }
        Ok(())
    }
}

/// violates — true iff any restriction fails at any checked horizon.
///
/// Pure predicate; assumes `restrictions.validate` passed for this tensor.
pub fn violates(responses: ArrayView3<'_, f64>, restrictions: &SignRestrictions) -> bool {
    (0..restrictions.check_horizons).any(|h| {
        restrictions.iter().any(|(v, s, sign)| !sign.holds(responses[[h, v, s]]))
    })
}
