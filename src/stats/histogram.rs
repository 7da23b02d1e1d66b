//! Flip-bit histogram using HdrHistogram
//!
//! Percentiles come from an auto-resizing HdrHistogram with 3 significant
//! digits. Min, max and mean are tracked exactly alongside it, since flip-bit
//! values are small integers and an approximate minimum would be misleading.
//!
//! # Example
//!
//! ```
//! use flipgen::stats::histogram::FlipBitHistogram;
//!
//! let mut hist = FlipBitHistogram::new();
//! hist.record(19);
//! hist.record(23);
//!
//! assert_eq!(hist.min(), Some(19));
//! assert_eq!(hist.max(), Some(23));
//! assert_eq!(hist.mean(), Some(21.0));
//! ```

use hdrhistogram::Histogram;

/// Distribution of flip-bit totals across accepted records
#[derive(Debug)]
pub struct FlipBitHistogram {
    histogram: Histogram<u64>,
    min: u64,
    max: u64,
    sum: u128,
}

impl FlipBitHistogram {
    pub fn new() -> Self {
        // Auto-resizing, 3 significant digits
        let histogram = Histogram::new(3)
            .expect("Failed to create histogram with valid precision");

        Self {
            histogram,
            min: u64::MAX,
            max: 0,
            sum: 0,
        }
    }

    #[inline]
    pub fn record(&mut self, flip_bit: u64) {
        // Only fails past the auto-resize ceiling; exact stats still update
        let _ = self.histogram.record(flip_bit);
        self.min = self.min.min(flip_bit);
        self.max = self.max.max(flip_bit);
        self.sum += flip_bit as u128;
    }

    pub fn len(&self) -> u64 {
        self.histogram.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn min(&self) -> Option<u64> {
        (!self.is_empty()).then_some(self.min)
    }

    pub fn max(&self) -> Option<u64> {
        (!self.is_empty()).then_some(self.max)
    }

    pub fn mean(&self) -> Option<f64> {
        (!self.is_empty()).then(|| self.sum as f64 / self.len() as f64)
    }

    /// Value at `percentile` (0.0 - 100.0), within histogram precision
    pub fn percentile(&self, percentile: f64) -> Option<u64> {
        if self.is_empty() {
            return None;
        }
        Some(self.histogram.value_at_percentile(percentile))
    }
}

impl Default for FlipBitHistogram {
    fn default() -> Self {
        Self::new()
    }
}
