//! Candidate partitions and the random generator that proposes them
//!
//! Uses the xoshiro256++ PRNG, the same fast non-crypto generator the rest of
//! the crate relies on. A fixed seed reproduces the exact candidate sequence,
//! because the draw order within one candidate never changes:
//! MBU2 count, MBU3 count, MBUN occurrence count, then each MBUN width.

use super::bounds::BoundsConfig;
use super::{ErrorClass, FlipWidth, PartitionSource};
use crate::error::SamplerError;
use rand::Rng;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

/// Working state of one sampling attempt
///
/// Created fresh per attempt and dropped as soon as it is found infeasible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidatePartition {
    budget: u64,
    mbu2_count: u64,
    mbu3_count: u64,
    mbun_widths: Vec<FlipWidth>,
}

impl CandidatePartition {
    /// Build a candidate from explicit counts
    ///
    /// `mbun_widths` keeps draw order and must only hold MBUN widths (5, 6, 7).
    pub fn new(
        budget: u64,
        mbu2_count: u64,
        mbu3_count: u64,
        mbun_widths: Vec<FlipWidth>,
    ) -> Self {
        debug_assert!(
            mbun_widths.iter().all(|w| w.class() == ErrorClass::MbuN),
            "MBUN widths must be 5, 6 or 7: {:?}",
            mbun_widths
        );
        Self {
            budget,
            mbu2_count,
            mbu3_count,
            mbun_widths,
        }
    }

    pub fn budget(&self) -> u64 {
        self.budget
    }

    pub fn mbu2_count(&self) -> u64 {
        self.mbu2_count
    }

    pub fn mbu3_count(&self) -> u64 {
        self.mbu3_count
    }

    pub fn mbun_widths(&self) -> &[FlipWidth] {
        &self.mbun_widths
    }

    /// Bits consumed by the multi-bit upsets
    ///
    /// Saturates instead of wrapping, so an absurd candidate stays infeasible.
    pub fn flip_bit(&self) -> u64 {
        let mbun_bits = self
            .mbun_widths
            .iter()
            .fold(0u64, |acc, w| acc.saturating_add(w.bits()));

        self.mbu2_count
            .saturating_mul(2)
            .saturating_add(self.mbu3_count.saturating_mul(3))
            .saturating_add(mbun_bits)
    }

    /// Budget left for single-bit upsets, `None` when the candidate overshoots
    pub fn seu_count(&self) -> Option<u64> {
        self.budget.checked_sub(self.flip_bit())
    }
}

/// Random candidate generator
///
/// Draws each count uniformly within its inclusive bounds.
pub struct CandidateGenerator {
    bounds: BoundsConfig,
    rng: Xoshiro256PlusPlus,
}

impl CandidateGenerator {
    /// Create a generator with a random seed
    ///
    /// Fails when the budget is past the supported maximum or the bounds
    /// describe an empty MBU2 range.
    pub fn new(bounds: BoundsConfig) -> Result<Self, SamplerError> {
        bounds.validate()?;
        Ok(Self {
            bounds,
            rng: Xoshiro256PlusPlus::from_entropy(),
        })
    }

    /// Create a generator with a specific seed
    ///
    /// Useful for reproducible profiles and tests.
    pub fn with_seed(bounds: BoundsConfig, seed: u64) -> Result<Self, SamplerError> {
        bounds.validate()?;
        Ok(Self {
            bounds,
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
        })
    }

    pub fn bounds(&self) -> &BoundsConfig {
        &self.bounds
    }

    fn draw_mbun_width(&mut self) -> FlipWidth {
        let widths = ErrorClass::MbuN.widths();
        widths[self.rng.gen_range(0..widths.len())]
    }
}

impl PartitionSource for CandidateGenerator {
    fn budget(&self) -> u64 {
        self.bounds.budget
    }

    fn next_candidate(&mut self) -> CandidatePartition {
        let bounds = self.bounds;
        let mbu2_count = self.rng.gen_range(bounds.mbu2_min..=bounds.mbu2_max);
        let mbu3_count = self.rng.gen_range(0..=bounds.mbu3_max);
        let occurrences = self.rng.gen_range(0..=bounds.mbun_max);
        let mbun_widths = (0..occurrences).map(|_| self.draw_mbun_width()).collect();

        CandidatePartition::new(bounds.budget, mbu2_count, mbu3_count, mbun_widths)
    }
}
