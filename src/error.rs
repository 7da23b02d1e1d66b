//! Typed errors for the sampling core and the record encoding
//!
//! Application glue (CLI, config loading, file IO) uses `anyhow`; these enums
//! cover the failures callers may want to match on.

use thiserror::Error;

/// Failures raised while configuring or running the sampler
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SamplerError {
    /// The MBU2 range is empty (`min > max`)
    #[error("inverted MBU2 bounds: min {min} exceeds max {max}")]
    InvertedBounds { min: u64, max: u64 },

    /// The budget is past the supported maximum
    #[error("bit budget {budget} exceeds the supported maximum of {max}")]
    BudgetTooLarge { budget: u64, max: u64 },

    /// Even the smallest candidate the bounds allow overshoots the budget
    #[error("bounds can never fit the budget: minimum flip bits {min_flip_bits} > budget {budget}")]
    Unsatisfiable { min_flip_bits: u64, budget: u64 },

    /// The attempt ceiling was reached without a feasible candidate
    #[error("no feasible partition of {budget} bits after {attempts} attempts")]
    AttemptsExhausted { attempts: u64, budget: u64 },

    #[error("max_attempts must be at least 1")]
    InvalidMaxAttempts,
}

/// Failures raised while parsing an encoded record line
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordParseError {
    #[error("malformed token '{0}', expected <width>:<count>")]
    MalformedToken(String),

    #[error("unsupported flip width {0}")]
    UnknownWidth(u64),

    #[error("width {0} appears more than once")]
    DuplicateWidth(u64),

    #[error("width {0} has a zero count")]
    ZeroCount(u64),

    #[error("weighted bit total does not fit in 64 bits")]
    TotalOverflow,
}
