//! Bit-flip distribution sampling
//!
//! This module partitions a fixed budget of bit flips across error-size
//! classes. Each sampling attempt proposes a candidate partition, checks it
//! against the budget, and either discards it or turns it into an immutable
//! [`record::DistributionRecord`].
//!
//! # Error Classes
//!
//! - **SEU**: single-bit upset (width 1), absorbs whatever budget is left
//! - **MBU2**: two-bit upset, count bounded below and above
//! - **MBU3**: three-bit upset, count bounded above
//! - **MBUN**: wide upset, each occurrence independently 5, 6 or 7 bits
//!
//! # Example
//!
//! ```
//! use flipgen::distribution::bounds::BoundsConfig;
//! use flipgen::distribution::candidate::CandidateGenerator;
//! use flipgen::distribution::sampler::Sampler;
//!
//! let bounds = BoundsConfig::from_budget(100);
//! let generator = CandidateGenerator::with_seed(bounds, 7).unwrap();
//! let mut sampler = Sampler::new(generator, 1_000).unwrap();
//!
//! let sampled = sampler.sample().unwrap();
//! assert_eq!(sampled.record.total_bits(), 100);
//! ```

pub mod bounds;
pub mod candidate;
pub mod record;
pub mod sampler;

use candidate::CandidatePartition;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Narrowest width an MBUN occurrence may draw
pub const MBUN_MIN_WIDTH: u64 = 5;
/// Widest width an MBUN occurrence may draw
pub const MBUN_MAX_WIDTH: u64 = 7;

/// Number of distinct flip widths
pub const WIDTH_COUNT: usize = 6;

/// Error-size class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorClass {
    Seu,
    Mbu2,
    Mbu3,
    MbuN,
}

impl ErrorClass {
    /// Concrete widths an occurrence of this class can have
    pub fn widths(self) -> &'static [FlipWidth] {
        match self {
            ErrorClass::Seu => &[FlipWidth::One],
            ErrorClass::Mbu2 => &[FlipWidth::Two],
            ErrorClass::Mbu3 => &[FlipWidth::Three],
            ErrorClass::MbuN => &[FlipWidth::Five, FlipWidth::Six, FlipWidth::Seven],
        }
    }
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorClass::Seu => write!(f, "SEU"),
            ErrorClass::Mbu2 => write!(f, "MBU2"),
            ErrorClass::Mbu3 => write!(f, "MBU3"),
            ErrorClass::MbuN => write!(f, "MBUN"),
        }
    }
}

/// Width of a single upset in bits
///
/// This is the key of a distribution record. The set is closed: widths 4 and
/// anything above 7 never occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FlipWidth {
    One,
    Two,
    Three,
    Five,
    Six,
    Seven,
}

impl FlipWidth {
    /// All widths in ascending order
    pub const ALL: [FlipWidth; WIDTH_COUNT] = [
        FlipWidth::One,
        FlipWidth::Two,
        FlipWidth::Three,
        FlipWidth::Five,
        FlipWidth::Six,
        FlipWidth::Seven,
    ];

    /// Number of bits flipped by one occurrence
    pub const fn bits(self) -> u64 {
        match self {
            FlipWidth::One => 1,
            FlipWidth::Two => 2,
            FlipWidth::Three => 3,
            FlipWidth::Five => 5,
            FlipWidth::Six => 6,
            FlipWidth::Seven => 7,
        }
    }

    /// Look up a width by its bit count
    pub const fn from_bits(bits: u64) -> Option<Self> {
        match bits {
            1 => Some(FlipWidth::One),
            2 => Some(FlipWidth::Two),
            3 => Some(FlipWidth::Three),
            5 => Some(FlipWidth::Five),
            6 => Some(FlipWidth::Six),
            7 => Some(FlipWidth::Seven),
            _ => None,
        }
    }

    pub const fn class(self) -> ErrorClass {
        match self {
            FlipWidth::One => ErrorClass::Seu,
            FlipWidth::Two => ErrorClass::Mbu2,
            FlipWidth::Three => ErrorClass::Mbu3,
            FlipWidth::Five | FlipWidth::Six | FlipWidth::Seven => ErrorClass::MbuN,
        }
    }

    /// Position in [`FlipWidth::ALL`]
    pub(crate) const fn index(self) -> usize {
        match self {
            FlipWidth::One => 0,
            FlipWidth::Two => 1,
            FlipWidth::Three => 2,
            FlipWidth::Five => 3,
            FlipWidth::Six => 4,
            FlipWidth::Seven => 5,
        }
    }
}

impl fmt::Display for FlipWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits())
    }
}

/// Source of candidate partitions
///
/// The sampler pulls one candidate per attempt and never feeds anything back,
/// so every call must be independent of earlier rejections.
///
/// [`candidate::CandidateGenerator`] is the random implementation; tests plug
/// in scripted sources to drive the rejection path deterministically.
pub trait PartitionSource {
    /// Bit budget every candidate from this source is measured against
    fn budget(&self) -> u64;

    /// Propose a fresh candidate
    fn next_candidate(&mut self) -> CandidatePartition;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_bits_round_trip() {
        for width in FlipWidth::ALL {
            assert_eq!(FlipWidth::from_bits(width.bits()), Some(width));
        }
        assert_eq!(FlipWidth::from_bits(0), None);
        assert_eq!(FlipWidth::from_bits(4), None);
        assert_eq!(FlipWidth::from_bits(8), None);
    }

    #[test]
    fn test_width_index_matches_all() {
        for (i, width) in FlipWidth::ALL.iter().enumerate() {
            assert_eq!(width.index(), i);
        }
    }

    #[test]
    fn test_class_widths_are_consistent() {
        for class in [ErrorClass::Seu, ErrorClass::Mbu2, ErrorClass::Mbu3, ErrorClass::MbuN] {
            for width in class.widths() {
                assert_eq!(width.class(), class);
            }
        }
        let mbun: Vec<u64> = ErrorClass::MbuN.widths().iter().map(|w| w.bits()).collect();
        assert_eq!(mbun, (MBUN_MIN_WIDTH..=MBUN_MAX_WIDTH).collect::<Vec<_>>());
    }

    #[test]
    fn test_display() {
        assert_eq!(FlipWidth::Six.to_string(), "6");
        assert_eq!(ErrorClass::MbuN.to_string(), "MBUN");
    }
}
