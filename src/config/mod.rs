//! Configuration module
//!
//! Handles CLI argument parsing, TOML configuration files, and validation.
//! A TOML file may set everything except the bit budget, which always comes
//! from the command line; CLI flags override file values.
//!
//! ```toml
//! [generator]
//! records = 1000
//! max_attempts = 10000
//! seed = 42
//!
//! [bounds]
//! mbu2_min_pct = 2
//! mbu2_max_pct = 12
//! mbu3_max_pct = 2
//! mbun_max_pct = 1
//!
//! [output]
//! format = "text"
//! path = "profiles/error_counts_100.txt"
//! summary_json = "profiles/summary_100.json"
//! ```

pub mod cli;
pub mod toml;
pub mod validator;

use crate::distribution::bounds::{BoundsConfig, BoundsRatios};
use crate::distribution::sampler::DEFAULT_MAX_ATTEMPTS;
use crate::output::{default_output_path, OutputFormat};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete generation configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Bit budget; set from the command line, never from a file
    #[serde(skip)]
    pub total_bits: u64,
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub bounds: BoundsRatios,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Sampling loop settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Number of records to emit
    #[serde(default = "default_records")]
    pub records: u64,
    /// Attempt ceiling per record
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u64,
    /// PRNG seed (random when absent)
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_records() -> u64 {
    1000
}

fn default_max_attempts() -> u64 {
    DEFAULT_MAX_ATTEMPTS
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            records: default_records(),
            max_attempts: default_max_attempts(),
            seed: None,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Record file (defaults to `error_counts_<T>.<ext>`)
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub format: OutputFormat,
    /// Where to write the JSON run summary, if anywhere
    pub summary_json: Option<PathBuf>,
}

impl Config {
    /// Default configuration for a bit budget
    pub fn new(total_bits: u64) -> Self {
        Self {
            total_bits,
            ..Self::default()
        }
    }

    /// Class bounds for the configured budget and ratios
    pub fn bounds(&self) -> BoundsConfig {
        BoundsConfig::with_ratios(self.total_bits, &self.bounds)
    }

    /// Resolved record file path
    pub fn output_path(&self) -> PathBuf {
        self.output
            .path
            .clone()
            .unwrap_or_else(|| default_output_path(self.total_bits, self.output.format))
    }
}
