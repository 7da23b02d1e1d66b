//! Record sinks and result reporting
//!
//! Accepted records leave the sampler through a [`RecordSink`]. The sink is
//! opened once per run, written by a single writer, and flushed by
//! [`RecordSink::finish`] when the run ends, successfully or not.
//!
//! # Formats
//!
//! - **text**: `<width>:<count>` tokens, one record per line (default)
//! - **json**: JSON Lines, one object per record

pub mod json;
pub mod text;

use crate::distribution::record::DistributionRecord;
use crate::Result;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Encoding used for the record file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Json => "jsonl",
        }
    }
}

/// Destination for emitted records
pub trait RecordSink {
    /// Append one record
    fn write_record(&mut self, record: &DistributionRecord) -> Result<()>;

    /// Flush everything written so far
    fn finish(&mut self) -> Result<()>;
}

/// Output file name derived from the bit budget, e.g. `error_counts_100.txt`
pub fn default_output_path(budget: u64, format: OutputFormat) -> PathBuf {
    PathBuf::from(format!("error_counts_{}.{}", budget, format.extension()))
}

/// Create (truncating) `path` and wrap it in a buffered sink of `format`
pub fn open_sink(path: &Path, format: OutputFormat, budget: u64) -> Result<Box<dyn RecordSink>> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    let writer = BufWriter::new(file);

    Ok(match format {
        OutputFormat::Text => Box::new(text::TextSink::new(writer)),
        OutputFormat::Json => Box::new(json::JsonLinesSink::new(writer, budget)),
    })
}
