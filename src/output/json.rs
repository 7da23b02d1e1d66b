//! JSON output formatting
//!
//! Records are written as JSON Lines:
//!
//! ```text
//! {"budget":100,"counts":{"1":81,"2":5,"3":1,"6":1}}
//! ```
//!
//! Only non-zero widths appear under `counts`, matching the text encoding.
//! The run summary can also be written as a standalone JSON document.

use super::RecordSink;
use crate::distribution::record::DistributionRecord;
use crate::distribution::FlipWidth;
use crate::error::RecordParseError;
use crate::stats::RunSummary;
use crate::Result;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// One record as it appears in a JSON Lines file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonRecord {
    pub budget: u64,
    /// Width in bits -> occurrence count
    pub counts: BTreeMap<u64, u64>,
}

impl JsonRecord {
    pub fn from_record(record: &DistributionRecord, budget: u64) -> Self {
        Self {
            budget,
            counts: record.iter().map(|(w, c)| (w.bits(), c)).collect(),
        }
    }

    /// Convert back to a typed record
    ///
    /// Widths outside the known set and totals past `u64::MAX` are rejected.
    pub fn to_record(&self) -> std::result::Result<DistributionRecord, RecordParseError> {
        let pairs = self
            .counts
            .iter()
            .map(|(&bits, &count)| {
                FlipWidth::from_bits(bits)
                    .map(|w| (w, count))
                    .ok_or(RecordParseError::UnknownWidth(bits))
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let record = DistributionRecord::from_counts(pairs);
        record.checked_total_bits().ok_or(RecordParseError::TotalOverflow)?;
        Ok(record)
    }
}

/// JSON Lines record sink
pub struct JsonLinesSink<W: Write> {
    writer: W,
    budget: u64,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W, budget: u64) -> Self {
        Self { writer, budget }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RecordSink for JsonLinesSink<W> {
    fn write_record(&mut self, record: &DistributionRecord) -> Result<()> {
        let line = JsonRecord::from_record(record, self.budget);
        serde_json::to_writer(&mut self.writer, &line)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Write the run summary to file
pub fn write_summary_json(path: &Path, summary: &RunSummary, pretty: bool) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create summary file: {}", path.display()))?;

    if pretty {
        serde_json::to_writer_pretty(file, summary)?;
    } else {
        serde_json::to_writer(file, summary)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::RunStats;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_json_sink_line_shape() {
        let record = DistributionRecord::from_counts([
            (FlipWidth::One, 81),
            (FlipWidth::Two, 5),
            (FlipWidth::Three, 1),
            (FlipWidth::Six, 1),
        ]);

        let mut sink = JsonLinesSink::new(Vec::new(), 100);
        sink.write_record(&record).unwrap();
        sink.finish().unwrap();

        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(output, "{\"budget\":100,\"counts\":{\"1\":81,\"2\":5,\"3\":1,\"6\":1}}\n");

        let parsed: JsonRecord = serde_json::from_str(output.trim_end()).unwrap();
        assert_eq!(parsed.to_record().unwrap(), record);
    }

    #[test]
    fn test_json_record_unknown_width() {
        let parsed: JsonRecord = serde_json::from_str(r#"{"budget":8,"counts":{"8":1}}"#).unwrap();
        assert_eq!(parsed.to_record(), Err(RecordParseError::UnknownWidth(8)));
    }

    #[test]
    fn test_json_record_overflowing_total() {
        let parsed: JsonRecord =
            serde_json::from_str(r#"{"budget":0,"counts":{"7":3000000000000000000}}"#).unwrap();
        assert_eq!(parsed.to_record(), Err(RecordParseError::TotalOverflow));
    }

    #[test]
    fn test_write_summary_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("summary.json");

        let summary = RunStats::new().summary(100, Duration::from_secs(1));
        write_summary_json(&path, &summary, true).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["budget"], 100);
        assert_eq!(value["elapsed_secs"], 1.0);
    }
}
