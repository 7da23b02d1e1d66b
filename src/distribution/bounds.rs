//! Proportional class bounds
//!
//! Every bound is a fixed percentage of the bit budget, floored. The floor is
//! computed in integer arithmetic so `floor(0.12 * 25)` is exactly 3 and never
//! 2.999... rounded down.

use crate::error::SamplerError;
use serde::{Deserialize, Serialize};

/// Largest bit budget accepted
///
/// Every candidate holds up to `mbun_max_pct` percent of the budget as
/// individual MBUN draws, so candidate cost grows linearly with the budget.
pub const MAX_BUDGET: u64 = 100_000_000;

/// Proportional constants, in whole percent of the bit budget
///
/// The defaults are the reference profile: MBU2 between 2% and 12% of the
/// budget, MBU3 up to 2%, and up to 1% MBUN occurrences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundsRatios {
    pub mbu2_min_pct: u64,
    pub mbu2_max_pct: u64,
    pub mbu3_max_pct: u64,
    pub mbun_max_pct: u64,
}

impl Default for BoundsRatios {
    fn default() -> Self {
        Self {
            mbu2_min_pct: 2,
            mbu2_max_pct: 12,
            mbu3_max_pct: 2,
            mbun_max_pct: 1,
        }
    }
}

/// Per-class count bounds for one bit budget
///
/// MBU3 and MBUN have an implicit minimum of zero. `mbun_max` bounds the
/// number of MBUN occurrences, not their bit width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoundsConfig {
    pub budget: u64,
    pub mbu2_min: u64,
    pub mbu2_max: u64,
    pub mbu3_max: u64,
    pub mbun_max: u64,
}

impl BoundsConfig {
    /// Bounds for `budget` using the default ratios
    ///
    /// # Example
    ///
    /// ```
    /// use flipgen::distribution::bounds::BoundsConfig;
    ///
    /// let bounds = BoundsConfig::from_budget(100);
    /// assert_eq!((bounds.mbu2_min, bounds.mbu2_max), (2, 12));
    /// assert_eq!(bounds.mbu3_max, 2);
    /// assert_eq!(bounds.mbun_max, 1);
    /// ```
    pub fn from_budget(budget: u64) -> Self {
        Self::with_ratios(budget, &BoundsRatios::default())
    }

    /// Bounds for `budget` using custom ratios
    pub fn with_ratios(budget: u64, ratios: &BoundsRatios) -> Self {
        Self {
            budget,
            mbu2_min: floor_percent(budget, ratios.mbu2_min_pct),
            mbu2_max: floor_percent(budget, ratios.mbu2_max_pct),
            mbu3_max: floor_percent(budget, ratios.mbu3_max_pct),
            mbun_max: floor_percent(budget, ratios.mbun_max_pct),
        }
    }

    /// Check the budget limit and that every range is non-empty
    pub fn validate(&self) -> Result<(), SamplerError> {
        if self.budget > MAX_BUDGET {
            return Err(SamplerError::BudgetTooLarge {
                budget: self.budget,
                max: MAX_BUDGET,
            });
        }
        if self.mbu2_min > self.mbu2_max {
            return Err(SamplerError::InvertedBounds {
                min: self.mbu2_min,
                max: self.mbu2_max,
            });
        }
        Ok(())
    }

    /// Flip bits of the smallest candidate the bounds allow
    pub fn min_flip_bits(&self) -> u64 {
        self.mbu2_min.saturating_mul(2)
    }

    /// Flip bits of the largest candidate the bounds allow
    ///
    /// When this does not exceed the budget no candidate can be rejected.
    pub fn max_flip_bits(&self) -> u64 {
        self.mbu2_max
            .saturating_mul(2)
            .saturating_add(self.mbu3_max.saturating_mul(3))
            .saturating_add(self.mbun_max.saturating_mul(super::MBUN_MAX_WIDTH))
    }
}

fn floor_percent(budget: u64, pct: u64) -> u64 {
    (budget as u128 * pct as u128 / 100) as u64
}
