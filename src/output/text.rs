//! Plain-text record encoding and human-readable reporting
//!
//! A record is one line of space-separated `<width>:<count>` tokens in
//! ascending width order. Widths with a zero count are left out, so the
//! all-zero record of a zero budget is an empty line.
//!
//! ```
//! use flipgen::distribution::record::DistributionRecord;
//! use flipgen::distribution::FlipWidth;
//! use flipgen::output::text::{encode_record, parse_record_line};
//!
//! let record = DistributionRecord::from_counts([
//!     (FlipWidth::One, 81),
//!     (FlipWidth::Two, 5),
//!     (FlipWidth::Three, 1),
//!     (FlipWidth::Six, 1),
//! ]);
//! assert_eq!(encode_record(&record), "1:81 2:5 3:1 6:1");
//! assert_eq!(parse_record_line("1:81 2:5 3:1 6:1").unwrap(), record);
//! ```

use super::RecordSink;
use crate::distribution::record::DistributionRecord;
use crate::distribution::{FlipWidth, WIDTH_COUNT};
use crate::error::RecordParseError;
use crate::stats::RunSummary;
use crate::util::time::{format_duration, format_rate};
use crate::Result;
use anyhow::Context;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Encode a record as a single line, without the trailing newline
pub fn encode_record(record: &DistributionRecord) -> String {
    record
        .iter()
        .map(|(width, count)| format!("{}:{}", width, count))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse one encoded line back into a record
///
/// Surrounding whitespace is ignored. Unknown widths, repeated widths, zero
/// counts, totals past `u64::MAX` and anything that is not `<u64>:<u64>` are
/// rejected.
pub fn parse_record_line(line: &str) -> std::result::Result<DistributionRecord, RecordParseError> {
    let mut seen = [false; WIDTH_COUNT];
    let mut pairs = Vec::new();

    for token in line.split_whitespace() {
        let malformed = || RecordParseError::MalformedToken(token.to_string());

        let (width_str, count_str) = token.split_once(':').ok_or_else(malformed)?;
        let bits: u64 = width_str.parse().map_err(|_| malformed())?;
        let count: u64 = count_str.parse().map_err(|_| malformed())?;

        let width = FlipWidth::from_bits(bits).ok_or(RecordParseError::UnknownWidth(bits))?;
        if seen[width.index()] {
            return Err(RecordParseError::DuplicateWidth(bits));
        }
        if count == 0 {
            return Err(RecordParseError::ZeroCount(bits));
        }
        seen[width.index()] = true;
        pairs.push((width, count));
    }

    let record = DistributionRecord::from_counts(pairs);
    record.checked_total_bits().ok_or(RecordParseError::TotalOverflow)?;
    Ok(record)
}

/// Read every record from a text record file
pub fn read_records(path: &Path) -> Result<Vec<DistributionRecord>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read record file: {}", path.display()))?;

    content
        .lines()
        .enumerate()
        .map(|(i, line)| {
            parse_record_line(line)
                .with_context(|| format!("{}:{}: invalid record", path.display(), i + 1))
        })
        .collect()
}

/// Line-per-record text sink
pub struct TextSink<W: Write> {
    writer: W,
}

impl<W: Write> TextSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RecordSink for TextSink<W> {
    fn write_record(&mut self, record: &DistributionRecord) -> Result<()> {
        writeln!(self.writer, "{}", encode_record(record))?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Print run results to console
pub fn print_summary(summary: &RunSummary, output_path: &Path) {
    println!("═══════════════════════════════════════════════════════════");
    println!("                    GENERATION RESULTS");
    println!("═══════════════════════════════════════════════════════════");
    println!();

    let elapsed = summary.elapsed();

    println!("Elapsed Time: {}", format_duration(elapsed));
    println!("Output:       {}", output_path.display());
    println!();

    println!("Sampling:");
    println!("  Bit budget: {}", format_number(summary.budget));
    println!("  Records:    {}", format_number(summary.records));
    println!(
        "  Attempts:   {} ({})",
        format_number(summary.attempts),
        format_rate(summary.attempts, elapsed)
    );
    println!("  Rejected:   {}", format_number(summary.rejections));
    println!("  Accepted:   {:.2}%", summary.acceptance_rate * 100.0);
    println!();

    println!("Flip bits per record (multi-bit upsets):");
    match (summary.flip_bit.min, summary.flip_bit.mean, summary.flip_bit.max) {
        (Some(min), Some(mean), Some(max)) => {
            println!("  Min:  {}", min);
            println!("  Mean: {:.2}", mean);
            println!("  Max:  {}", max);
            if let (Some(p50), Some(p99)) = (summary.flip_bit.p50, summary.flip_bit.p99) {
                println!("  p50:  {}", p50);
                println!("  p99:  {}", p99);
            }
        }
        _ => println!("  No records emitted"),
    }
    println!();

    if !summary.width_totals.is_empty() {
        println!("Occurrences by width:");
        for (width, total) in &summary.width_totals {
            println!("  {}-bit: {}", width, format_number(*total));
        }
        println!();
    }

    println!("═══════════════════════════════════════════════════════════");
}

/// Format a number with thousands separators
fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();

    for (count, c) in s.chars().rev().enumerate() {
        if count > 0 && count % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    result.chars().rev().collect()
}
