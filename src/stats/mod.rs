//! Run statistics
//!
//! Tracks how a generation run went: attempts, rejections, emitted records,
//! how many occurrences of each width were emitted in total, and the spread
//! of flip bits (bits taken by multi-bit upsets) across accepted records.

pub mod histogram;

use crate::distribution::record::DistributionRecord;
use crate::distribution::{FlipWidth, WIDTH_COUNT};
use chrono::{DateTime, Utc};
use histogram::FlipBitHistogram;
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Duration;

/// Counters for a single generation run
#[derive(Debug)]
pub struct RunStats {
    records: u64,
    attempts: u64,
    rejections: u64,
    width_totals: [u64; WIDTH_COUNT],
    flip_bits: FlipBitHistogram,
}

impl RunStats {
    pub fn new() -> Self {
        Self {
            records: 0,
            attempts: 0,
            rejections: 0,
            width_totals: [0; WIDTH_COUNT],
            flip_bits: FlipBitHistogram::new(),
        }
    }

    /// Count `count` infeasible candidates at once
    #[inline]
    pub fn record_rejections(&mut self, count: u64) {
        self.attempts += count;
        self.rejections += count;
    }

    /// Count one accepted candidate and the record it produced
    pub fn record_accepted(&mut self, record: &DistributionRecord, flip_bit: u64) {
        self.attempts += 1;
        self.records += 1;
        for (width, count) in record.iter() {
            self.width_totals[width.index()] += count;
        }
        self.flip_bits.record(flip_bit);
    }

    pub fn records(&self) -> u64 {
        self.records
    }

    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    pub fn rejections(&self) -> u64 {
        self.rejections
    }

    /// Total occurrences of `width` across all emitted records
    pub fn width_total(&self, width: FlipWidth) -> u64 {
        self.width_totals[width.index()]
    }

    pub fn flip_bits(&self) -> &FlipBitHistogram {
        &self.flip_bits
    }

    /// Fraction of attempts that were accepted (1.0 before any attempt)
    pub fn acceptance_rate(&self) -> f64 {
        if self.attempts == 0 {
            return 1.0;
        }
        self.records as f64 / self.attempts as f64
    }

    /// Freeze the counters into a serializable summary
    pub fn summary(&self, budget: u64, elapsed: Duration) -> RunSummary {
        let width_totals = FlipWidth::ALL
            .into_iter()
            .map(|w| (w.bits(), self.width_total(w)))
            .filter(|&(_, total)| total > 0)
            .collect();

        RunSummary {
            generated_at: Utc::now(),
            budget,
            records: self.records,
            attempts: self.attempts,
            rejections: self.rejections,
            acceptance_rate: self.acceptance_rate(),
            elapsed_secs: elapsed.as_secs_f64(),
            flip_bit: FlipBitSummary {
                min: self.flip_bits.min(),
                mean: self.flip_bits.mean(),
                max: self.flip_bits.max(),
                p50: self.flip_bits.percentile(50.0),
                p99: self.flip_bits.percentile(99.0),
            },
            width_totals,
        }
    }
}

impl Default for RunStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Flip-bit spread across accepted records
#[derive(Debug, Clone, Serialize)]
pub struct FlipBitSummary {
    pub min: Option<u64>,
    pub mean: Option<f64>,
    pub max: Option<u64>,
    pub p50: Option<u64>,
    pub p99: Option<u64>,
}

/// End-of-run report
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub generated_at: DateTime<Utc>,
    pub budget: u64,
    pub records: u64,
    pub attempts: u64,
    pub rejections: u64,
    pub acceptance_rate: f64,
    pub elapsed_secs: f64,
    pub flip_bit: FlipBitSummary,
    /// Width in bits -> occurrences summed over every record
    pub width_totals: BTreeMap<u64, u64>,
}

impl RunSummary {
    pub fn elapsed(&self) -> Duration {
        Duration::from_secs_f64(self.elapsed_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_stats_counts() {
        let mut stats = RunStats::new();
        stats.record_rejections(2);

        let record = DistributionRecord::from_counts([
            (FlipWidth::One, 81),
            (FlipWidth::Two, 5),
            (FlipWidth::Three, 1),
            (FlipWidth::Six, 1),
        ]);
        stats.record_accepted(&record, 19);

        assert_eq!(stats.attempts(), 3);
        assert_eq!(stats.rejections(), 2);
        assert_eq!(stats.records(), 1);
        assert_eq!(stats.width_total(FlipWidth::One), 81);
        assert_eq!(stats.width_total(FlipWidth::Six), 1);
        assert_eq!(stats.width_total(FlipWidth::Seven), 0);
        assert!((stats.acceptance_rate() - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_record_rejections_in_bulk() {
        let mut stats = RunStats::new();
        stats.record_rejections(0);
        stats.record_rejections(4);
        stats.record_rejections(1);

        assert_eq!(stats.attempts(), 5);
        assert_eq!(stats.rejections(), 5);
        assert_eq!(stats.records(), 0);
    }

    #[test]
    fn test_acceptance_rate_without_attempts() {
        assert_eq!(RunStats::new().acceptance_rate(), 1.0);
    }

    #[test]
    fn test_summary_fields() {
        let mut stats = RunStats::new();
        let first = DistributionRecord::from_counts([(FlipWidth::One, 6), (FlipWidth::Two, 2)]);
        let second = DistributionRecord::from_counts([(FlipWidth::One, 4), (FlipWidth::Two, 3)]);
        stats.record_accepted(&first, 4);
        stats.record_accepted(&second, 6);

        let summary = stats.summary(10, Duration::from_millis(1500));
        assert_eq!(summary.budget, 10);
        assert_eq!(summary.records, 2);
        assert_eq!(summary.attempts, 2);
        assert_eq!(summary.flip_bit.min, Some(4));
        assert_eq!(summary.flip_bit.max, Some(6));
        assert_eq!(summary.flip_bit.mean, Some(5.0));
        assert_eq!(summary.width_totals.get(&1), Some(&10));
        assert_eq!(summary.width_totals.get(&2), Some(&5));
        assert_eq!(summary.width_totals.get(&3), None);
        assert_eq!(summary.elapsed(), Duration::from_millis(1500));
    }

    #[test]
    fn test_summary_serializes() {
        let summary = RunStats::new().summary(0, Duration::ZERO);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["records"], 0);
        assert!(json["flip_bit"]["min"].is_null());
        assert!(json["generated_at"].is_string());
    }
}
