//! Feasibility check and bounded rejection sampling
//!
//! A candidate is feasible iff its multi-bit upsets fit inside the budget.
//! Infeasible candidates are dropped whole and the next attempt starts from
//! scratch; nothing is repaired incrementally.

use super::candidate::CandidatePartition;
use super::record::DistributionRecord;
use super::PartitionSource;
use crate::error::SamplerError;
use tracing::debug;

/// Default per-record attempt ceiling
pub const DEFAULT_MAX_ATTEMPTS: u64 = 10_000;

/// Outcome of checking one candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feasibility {
    Accepted {
        record: DistributionRecord,
        flip_bit: u64,
    },
    Infeasible {
        flip_bit: u64,
        budget: u64,
    },
}

/// Check a candidate against its budget
///
/// # Panics
///
/// Panics if an accepted candidate does not account for the budget exactly.
/// That can only mean the accounting arithmetic itself is broken.
pub fn check_feasibility(candidate: &CandidatePartition) -> Feasibility {
    let budget = candidate.budget();
    let flip_bit = candidate.flip_bit();

    let Some(record) = DistributionRecord::from_candidate(candidate) else {
        return Feasibility::Infeasible { flip_bit, budget };
    };

    let seu_count = record.count(super::FlipWidth::One);
    assert_eq!(
        seu_count + flip_bit,
        budget,
        "accounting broken: seu {} + flip {} != budget {}",
        seu_count,
        flip_bit,
        budget
    );
    assert_eq!(record.total_bits(), budget, "record does not sum to budget");

    Feasibility::Accepted { record, flip_bit }
}

/// Accepted record together with how it was obtained
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sampled {
    pub record: DistributionRecord,
    pub flip_bit: u64,
    /// Attempts spent on this record, the accepted one included
    pub attempts: u64,
}

/// Rejection sampler with an attempt ceiling
pub struct Sampler<S: PartitionSource> {
    source: S,
    max_attempts: u64,
}

impl<S: PartitionSource> Sampler<S> {
    /// Wrap a partition source
    ///
    /// `max_attempts` bounds the attempts spent on a single record.
    pub fn new(source: S, max_attempts: u64) -> Result<Self, SamplerError> {
        if max_attempts == 0 {
            return Err(SamplerError::InvalidMaxAttempts);
        }
        Ok(Self {
            source,
            max_attempts,
        })
    }

    pub fn budget(&self) -> u64 {
        self.source.budget()
    }

    pub fn max_attempts(&self) -> u64 {
        self.max_attempts
    }

    /// Propose and check exactly one candidate
    pub fn attempt(&mut self) -> Feasibility {
        let candidate = self.source.next_candidate();
        check_feasibility(&candidate)
    }

    /// Sample until a candidate is accepted or the ceiling is hit
    pub fn sample(&mut self) -> Result<Sampled, SamplerError> {
        for attempts in 1..=self.max_attempts {
            match self.attempt() {
                Feasibility::Accepted { record, flip_bit } => {
                    return Ok(Sampled {
                        record,
                        flip_bit,
                        attempts,
                    });
                }
                Feasibility::Infeasible { flip_bit, budget } => {
                    debug!(
                        attempt = attempts,
                        flip_bit,
                        budget,
                        "candidate out of budget, retrying"
                    );
                }
            }
        }

        Err(SamplerError::AttemptsExhausted {
            attempts: self.max_attempts,
            budget: self.budget(),
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::distribution::bounds::BoundsConfig;
    use crate::distribution::candidate::CandidateGenerator;
    use crate::distribution::FlipWidth;
    use std::collections::VecDeque;

    /// Replays a fixed list of candidates, then repeats the last one
    pub(crate) struct ScriptedSource {
        budget: u64,
        script: VecDeque<CandidatePartition>,
        last: CandidatePartition,
        pub(crate) calls: u64,
    }

    impl ScriptedSource {
        pub(crate) fn new(budget: u64, script: Vec<CandidatePartition>) -> Self {
            let last = script
                .last()
                .cloned()
                .unwrap_or_else(|| CandidatePartition::new(budget, 0, 0, vec![]));
            Self {
                budget,
                script: script.into(),
                last,
                calls: 0,
            }
        }
    }

    impl PartitionSource for ScriptedSource {
        fn budget(&self) -> u64 {
            self.budget
        }

        fn next_candidate(&mut self) -> CandidatePartition {
            self.calls += 1;
            self.script.pop_front().unwrap_or_else(|| self.last.clone())
        }
    }

    #[test]
    fn test_feasibility_reference_scenario() {
        let candidate = CandidatePartition::new(100, 5, 1, vec![FlipWidth::Six]);
        match check_feasibility(&candidate) {
            Feasibility::Accepted { record, flip_bit } => {
                assert_eq!(flip_bit, 19);
                assert_eq!(record.count(FlipWidth::One), 81);
            }
            other => panic!("expected acceptance, got {:?}", other),
        }
    }

    #[test]
    fn test_feasibility_rejects_overshoot() {
        let candidate = CandidatePartition::new(10, 3, 2, vec![]);
        assert_eq!(
            check_feasibility(&candidate),
            Feasibility::Infeasible { flip_bit: 12, budget: 10 }
        );
    }

    #[test]
    fn test_sample_retries_until_feasible() {
        let script = vec![
            CandidatePartition::new(10, 6, 0, vec![]),
            CandidatePartition::new(10, 1, 3, vec![]),
            CandidatePartition::new(10, 2, 0, vec![FlipWidth::Five]),
        ];
        let mut sampler = Sampler::new(ScriptedSource::new(10, script), 10).unwrap();

        let sampled = sampler.sample().unwrap();
        assert_eq!(sampled.attempts, 3);
        assert_eq!(sampled.flip_bit, 9);
        assert_eq!(sampled.record.count(FlipWidth::One), 1);
        assert_eq!(sampled.record.total_bits(), 10);
    }

    #[test]
    fn test_sample_exhausts_ceiling() {
        let script = vec![CandidatePartition::new(3, 2, 0, vec![])];
        let mut sampler = Sampler::new(ScriptedSource::new(3, script), 25).unwrap();

        assert_eq!(
            sampler.sample(),
            Err(SamplerError::AttemptsExhausted { attempts: 25, budget: 3 })
        );
        assert_eq!(sampler.source.calls, 25);
    }

    #[test]
    fn test_sampler_rejects_zero_ceiling() {
        let source = ScriptedSource::new(1, vec![]);
        assert!(matches!(Sampler::new(source, 0), Err(SamplerError::InvalidMaxAttempts)));
    }

    #[test]
    fn test_zero_budget_accepts_first_attempt() {
        let generator = CandidateGenerator::with_seed(BoundsConfig::from_budget(0), 1).unwrap();
        let mut sampler = Sampler::new(generator, 1).unwrap();

        for _ in 0..10 {
            let sampled = sampler.sample().unwrap();
            assert_eq!(sampled.attempts, 1);
            assert!(sampled.record.is_empty());
        }
    }

    #[test]
    fn test_sampled_records_hold_invariants() {
        for budget in [1u64, 7, 50, 100, 333, 1000, 4096] {
            let bounds = BoundsConfig::from_budget(budget);
            let generator = CandidateGenerator::with_seed(bounds, budget).unwrap();
            let mut sampler = Sampler::new(generator, DEFAULT_MAX_ATTEMPTS).unwrap();

            for _ in 0..200 {
                let record = sampler.sample().unwrap().record;
                assert_eq!(record.total_bits(), budget);
                let mbu2 = record.count(FlipWidth::Two);
                assert!(mbu2 >= bounds.mbu2_min && mbu2 <= bounds.mbu2_max);
                assert!(record.count(FlipWidth::Three) <= bounds.mbu3_max);
                assert!(record.mbun_occurrences() <= bounds.mbun_max);
            }
        }
    }
}
