//! Coordinator module
//!
//! Drives a generation run: samples until a candidate is accepted, emits the
//! record to the sink, and repeats until the requested number of records has
//! been written.
//!
//! # State Machine
//!
//! ```text
//! Init -> Sampling --accept--> Emit
//!         Emit --more needed--> Sampling
//!         Emit --target hit---> Done
//! ```
//!
//! Rejections and the per-record attempt ceiling are handled inside
//! [`Sampler::sample`]; the driver only sees accepted records or the
//! exhaustion error.
//!
//! All run state (record count, attempt counters) lives in [`RunState`] and
//! [`RunStats`] and is handed back to the caller as a [`RunSummary`].

use crate::config::Config;
use crate::distribution::candidate::CandidateGenerator;
use crate::distribution::record::DistributionRecord;
use crate::distribution::sampler::Sampler;
use crate::distribution::{FlipWidth, PartitionSource};
use crate::output::{open_sink, RecordSink};
use crate::stats::{RunStats, RunSummary};
use crate::Result;
use anyhow::Context;
use std::time::Instant;
use tracing::{debug, info};

/// Driver state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunState {
    Init,
    /// Proposing candidates for the next record
    Sampling,
    /// A feasible record is waiting to be written
    Emit {
        record: DistributionRecord,
        flip_bit: u64,
        attempts: u64,
    },
    Done,
}

/// Runs the sample/emit loop for a fixed number of records
pub struct Coordinator<S: PartitionSource> {
    sampler: Sampler<S>,
    target: u64,
}

impl<S: PartitionSource> Coordinator<S> {
    pub fn new(sampler: Sampler<S>, target: u64) -> Self {
        Self { sampler, target }
    }

    /// Generate `target` records into `sink`
    ///
    /// The sink is flushed before returning, also when sampling fails, so
    /// records emitted before the failure are kept.
    pub fn run(&mut self, sink: &mut dyn RecordSink) -> Result<RunSummary> {
        anyhow::ensure!(self.target > 0, "record target must be at least 1");

        let start = Instant::now();
        let mut stats = RunStats::new();

        let outcome = self.drive(sink, &mut stats);
        let flushed = sink.finish().context("Failed to flush record sink");

        outcome?;
        flushed?;

        let summary = stats.summary(self.sampler.budget(), start.elapsed());
        info!(
            records = summary.records,
            attempts = summary.attempts,
            rejections = summary.rejections,
            "generation finished"
        );
        Ok(summary)
    }

    fn drive(&mut self, sink: &mut dyn RecordSink, stats: &mut RunStats) -> Result<()> {
        let mut state = RunState::Init;

        loop {
            state = match state {
                RunState::Init => {
                    info!(
                        budget = self.sampler.budget(),
                        records = self.target,
                        max_attempts = self.sampler.max_attempts(),
                        "generation started"
                    );
                    RunState::Sampling
                }
                RunState::Sampling => {
                    let sampled = self.sampler.sample().with_context(|| {
                        format!(
                            "Sampling stopped after {} of {} records",
                            stats.records(),
                            self.target
                        )
                    })?;
                    stats.record_rejections(sampled.attempts - 1);

                    RunState::Emit {
                        record: sampled.record,
                        flip_bit: sampled.flip_bit,
                        attempts: sampled.attempts,
                    }
                }
                RunState::Emit {
                    record,
                    flip_bit,
                    attempts,
                } => {
                    let index = stats.records() + 1;
                    sink.write_record(&record)
                        .with_context(|| format!("Failed to write record {}", index))?;
                    stats.record_accepted(&record, flip_bit);

                    debug!(
                        record = stats.records(),
                        attempts,
                        seu = record.count(FlipWidth::One),
                        mbu2 = record.count(FlipWidth::Two),
                        mbu3 = record.count(FlipWidth::Three),
                        mbun = record.mbun_occurrences(),
                        "record emitted"
                    );

                    if stats.records() == self.target {
                        RunState::Done
                    } else {
                        RunState::Sampling
                    }
                }
                RunState::Done => return Ok(()),
            };
        }
    }
}

/// Generate records for `config`, writing them to its output path
///
/// # Example
///
/// ```no_run
/// use flipgen::config::Config;
/// use flipgen::coordinator::run_generation;
///
/// let mut config = Config::new(100);
/// config.generator.seed = Some(42);
/// let summary = run_generation(&config).unwrap();
/// assert_eq!(summary.records, 1000);
/// ```
pub fn run_generation(config: &Config) -> Result<RunSummary> {
    let bounds = config.bounds();
    let generator = match config.generator.seed {
        Some(seed) => CandidateGenerator::with_seed(bounds, seed),
        None => CandidateGenerator::new(bounds),
    }
    .context("Failed to create candidate generator")?;
    let sampler = Sampler::new(generator, config.generator.max_attempts)
        .context("Failed to create sampler")?;

    let path = config.output_path();
    let mut sink = open_sink(&path, config.output.format, config.total_bits)?;

    Coordinator::new(sampler, config.generator.records).run(sink.as_mut())
}
