//! CLI argument parsing using clap

use crate::output::OutputFormat;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Record file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// `<width>:<count>` tokens, one record per line
    Text,
    /// JSON Lines, one object per record
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

/// flipgen - randomized bit-flip fault profile generator
#[derive(Parser, Debug)]
#[command(name = "flipgen")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Total number of flipped bits each profile must account for
    #[arg(value_name = "TOTAL_BITS")]
    pub total_bits: u64,

    /// Number of profiles to generate [default: 1000]
    #[arg(short = 'n', long)]
    pub records: Option<u64>,

    /// PRNG seed for reproducible output
    #[arg(long, env = "FLIPGEN_SEED")]
    pub seed: Option<u64>,

    /// Maximum sampling attempts per profile [default: 10000]
    #[arg(long)]
    pub max_attempts: Option<u64>,

    /// Output file [default: error_counts_<TOTAL_BITS>.txt]
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,

    /// TOML configuration file
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Write a JSON run summary to this path
    #[arg(long)]
    pub summary_json: Option<PathBuf>,

    /// Dry run - validate configuration and show bounds without sampling
    #[arg(long)]
    pub dry_run: bool,

    /// Log every attempt and record (debug level)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate CLI arguments
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.records == Some(0) {
            anyhow::bail!("records must be at least 1");
        }

        if self.max_attempts == Some(0) {
            anyhow::bail!("max_attempts must be at least 1");
        }

        Ok(())
    }
}
