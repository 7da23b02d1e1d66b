//! Accepted distribution records

use super::candidate::CandidatePartition;
use super::{FlipWidth, WIDTH_COUNT};

/// Occurrence count per flip width
///
/// Built once from a feasible candidate and never mutated afterwards. The
/// weighted sum `Σ width·count` equals the bit budget the record was drawn
/// for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DistributionRecord {
    counts: [u64; WIDTH_COUNT],
}

impl DistributionRecord {
    /// Tally a feasible candidate
    ///
    /// Same-width MBUN draws merge into one count and the remaining budget
    /// goes to width 1. Returns `None` when the candidate overshoots.
    pub fn from_candidate(candidate: &CandidatePartition) -> Option<Self> {
        let seu_count = candidate.seu_count()?;

        let mut counts = [0u64; WIDTH_COUNT];
        counts[FlipWidth::One.index()] = seu_count;
        counts[FlipWidth::Two.index()] = candidate.mbu2_count();
        counts[FlipWidth::Three.index()] = candidate.mbu3_count();
        for width in candidate.mbun_widths() {
            counts[width.index()] += 1;
        }

        Some(Self { counts })
    }

    /// Build a record from `(width, count)` pairs
    ///
    /// Repeated widths add up.
    pub fn from_counts<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (FlipWidth, u64)>,
    {
        let mut counts = [0u64; WIDTH_COUNT];
        for (width, count) in pairs {
            let slot = &mut counts[width.index()];
            *slot = slot.saturating_add(count);
        }
        Self { counts }
    }

    pub fn count(&self, width: FlipWidth) -> u64 {
        self.counts[width.index()]
    }

    /// Non-zero entries in ascending width order
    pub fn iter(&self) -> impl Iterator<Item = (FlipWidth, u64)> + '_ {
        FlipWidth::ALL
            .into_iter()
            .map(move |w| (w, self.count(w)))
            .filter(|&(_, count)| count > 0)
    }

    /// Number of MBUN occurrences across widths 5, 6 and 7
    pub fn mbun_occurrences(&self) -> u64 {
        self.count(FlipWidth::Five) + self.count(FlipWidth::Six) + self.count(FlipWidth::Seven)
    }

    /// Weighted bit total `Σ width·count`, saturating at `u64::MAX`
    pub fn total_bits(&self) -> u64 {
        self.checked_total_bits().unwrap_or(u64::MAX)
    }

    /// Weighted bit total, `None` when it does not fit in a `u64`
    pub fn checked_total_bits(&self) -> Option<u64> {
        FlipWidth::ALL.into_iter().try_fold(0u64, |acc, w| {
            w.bits()
                .checked_mul(self.count(w))
                .and_then(|bits| acc.checked_add(bits))
        })
    }

    /// True when every count is zero (only possible for a zero budget)
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_from_candidate() {
        let candidate = CandidatePartition::new(100, 5, 1, vec![FlipWidth::Six]);
        let record = DistributionRecord::from_candidate(&candidate).unwrap();

        assert_eq!(record.count(FlipWidth::One), 81);
        assert_eq!(record.count(FlipWidth::Two), 5);
        assert_eq!(record.count(FlipWidth::Three), 1);
        assert_eq!(record.count(FlipWidth::Five), 0);
        assert_eq!(record.count(FlipWidth::Six), 1);
        assert_eq!(record.count(FlipWidth::Seven), 0);
        assert_eq!(record.total_bits(), 100);
    }

    #[test]
    fn test_record_merges_same_width_draws() {
        let widths = vec![FlipWidth::Five, FlipWidth::Seven, FlipWidth::Five];
        let candidate = CandidatePartition::new(200, 10, 2, widths);
        let record = DistributionRecord::from_candidate(&candidate).unwrap();

        assert_eq!(record.count(FlipWidth::Five), 2);
        assert_eq!(record.count(FlipWidth::Seven), 1);
        assert_eq!(record.mbun_occurrences(), 3);
        assert_eq!(record.total_bits(), 200);
    }

    #[test]
    fn test_record_rejects_overshoot() {
        let candidate = CandidatePartition::new(5, 3, 0, vec![]);
        assert!(DistributionRecord::from_candidate(&candidate).is_none());
    }

    #[test]
    fn test_record_iter_skips_zero_counts() {
        let record = DistributionRecord::from_counts([(FlipWidth::Seven, 2), (FlipWidth::One, 4)]);
        let entries: Vec<_> = record.iter().collect();
        assert_eq!(entries, vec![(FlipWidth::One, 4), (FlipWidth::Seven, 2)]);
    }

    #[test]
    fn test_total_bits_overflow() {
        let record =
            DistributionRecord::from_counts([(FlipWidth::Seven, 3_000_000_000_000_000_000)]);
        assert_eq!(record.checked_total_bits(), None);
        assert_eq!(record.total_bits(), u64::MAX);

        let record =
            DistributionRecord::from_counts([(FlipWidth::One, u64::MAX), (FlipWidth::One, 1)]);
        assert_eq!(record.count(FlipWidth::One), u64::MAX);
        assert_eq!(record.checked_total_bits(), Some(u64::MAX));
    }

    #[test]
    fn test_zero_record_is_empty() {
        let candidate = CandidatePartition::new(0, 0, 0, vec![]);
        let record = DistributionRecord::from_candidate(&candidate).unwrap();
        assert!(record.is_empty());
        assert_eq!(record.total_bits(), 0);
        assert_eq!(record.iter().count(), 0);
    }
}
