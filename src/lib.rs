//! flipgen - Randomized bit-flip fault profile generator
//!
//! flipgen produces fault-injection profiles for hardware reliability
//! testing. Each profile splits a fixed budget of bit flips across error-size
//! classes: single-bit upsets (SEU) and multi-bit upsets (MBU) of width 2, 3
//! and 5-7, with every class count kept within proportional bounds.
//!
//! # Architecture
//!
//! - **distribution**: bounds, candidate generation, feasibility, records
//! - **coordinator**: sample/emit loop with a per-record attempt ceiling
//! - **output**: text and JSON Lines record sinks, run summaries
//! - **stats**: attempt counters and flip-bit histogram
//! - **config**: CLI, TOML configuration, validation

pub mod config;
pub mod coordinator;
pub mod distribution;
pub mod error;
pub mod output;
pub mod stats;
pub mod util;

// Re-export commonly used types
pub use config::Config;
pub use distribution::record::DistributionRecord;
pub use error::SamplerError;

/// Result type used throughout flipgen
pub type Result<T> = anyhow::Result<T>;
