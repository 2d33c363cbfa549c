/*!
 * Parallel Filler
 *
 * Owns one SharedBuffer and fills it by dispatching a fixed iteration
 * space across a fixed-size pool of OS threads under a selectable
 * scheduling policy. One fork-join fill per instance: the buffer's
 * capacity equals the iteration count, so a second fill is rejected
 * instead of overrunning it.
 */

use crate::buffer::SharedBuffer;
use crate::core::{worker_label, FillConfig, FillError, FillState, Result, SpinDelay};
use crate::sched::{even_blocks, round_robin_chunks, Grant, Policy, RuntimeSchedule, WorkQueue};
use log::info;
use serde::Serialize;
use std::collections::BTreeMap;
use std::thread;

/// Resolved iteration-to-worker assignment for one fill
enum Assignment {
    /// Fixed per-worker range lists decided before dispatch
    Prearranged(Vec<Vec<std::ops::Range<usize>>>),
    /// Shared queue claimed block by block at runtime
    OnDemand(WorkQueue),
}

/// Post-fill buffer statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Readout {
    /// Full cell sequence, sentinels included
    pub contents: String,
    /// Occurrences of each worker's label
    pub counts: BTreeMap<char, usize>,
    /// Cursor position after the run
    pub cursor: usize,
    /// Racy writes discarded at or past capacity
    pub dropped_writes: usize,
}

/// Fills a shared buffer across a worker pool under one scheduling policy
pub struct ParallelFiller {
    config: FillConfig,
    buffer: SharedBuffer,
    runtime: RuntimeSchedule,
    state: FillState,
}

impl ParallelFiller {
    /// Create a filler with the demonstration constants (3 workers,
    /// 60 iterations, chunk 5)
    pub fn new(exclusive: bool) -> Self {
        // Default config always validates
        Self::with_config(FillConfig::default(), exclusive)
            .unwrap_or_else(|_| unreachable!("default config is valid"))
    }

    /// Create a filler with an explicit configuration
    pub fn with_config(config: FillConfig, exclusive: bool) -> Result<Self> {
        config.validate()?;
        let buffer = SharedBuffer::new(config.iterations, exclusive, SpinDelay::new(config.delay));
        Ok(Self {
            config,
            buffer,
            runtime: RuntimeSchedule::default(),
            state: FillState::Created,
        })
    }

    /// Inject the schedule consulted by `Policy::Runtime`
    pub fn with_runtime_schedule(mut self, schedule: RuntimeSchedule) -> Self {
        self.runtime = schedule;
        self
    }

    pub fn config(&self) -> &FillConfig {
        &self.config
    }

    pub fn state(&self) -> FillState {
        self.state
    }

    /// Resolve a policy to an assignment over this filler's iteration space
    fn resolve(&self, policy: Policy) -> Result<Assignment> {
        match policy {
            Policy::Runtime => {
                self.runtime.validate()?;
                self.resolve_concrete(self.runtime.policy, self.runtime.chunk)
            }
            // Implementation's pick: guided self-balances, which keeps
            // the demonstration output informative
            Policy::Auto => self.resolve_concrete(Policy::Guided, None),
            concrete => self.resolve_concrete(concrete, None),
        }
    }

    fn resolve_concrete(&self, policy: Policy, chunk_override: Option<usize>) -> Result<Assignment> {
        let FillConfig {
            workers,
            iterations,
            chunk,
            ..
        } = self.config;
        let chunk = chunk_override.unwrap_or(chunk);

        let assignment = match policy {
            Policy::Static => match chunk_override {
                // A runtime schedule with a chunk turns static into
                // round-robin chunked, as OpenMP's "static,n" does
                Some(chunk) => Assignment::Prearranged(round_robin_chunks(iterations, workers, chunk)),
                None => Assignment::Prearranged(even_blocks(iterations, workers)),
            },
            Policy::StaticChunk => {
                Assignment::Prearranged(round_robin_chunks(iterations, workers, chunk))
            }
            Policy::Dynamic => Assignment::OnDemand(WorkQueue::new(
                iterations,
                Grant::Fixed(chunk_override.unwrap_or(1)),
            )),
            Policy::DynamicChunk => {
                Assignment::OnDemand(WorkQueue::new(iterations, Grant::Fixed(chunk)))
            }
            Policy::Guided => Assignment::OnDemand(WorkQueue::new(
                iterations,
                Grant::Guided {
                    workers,
                    floor: chunk_override.unwrap_or(1),
                },
            )),
            Policy::GuidedChunk => Assignment::OnDemand(WorkQueue::new(
                iterations,
                Grant::Guided {
                    workers,
                    floor: chunk,
                },
            )),
            Policy::Runtime | Policy::Auto => {
                return Err(FillError::UnsupportedPolicy(format!(
                    "{} cannot resolve to itself",
                    policy
                )))
            }
        };
        Ok(assignment)
    }

    /// Run the fill: fork `workers` threads, execute every iteration
    /// exactly once under `policy`, join them all before returning
    ///
    /// Worker `i` appends the label `'A' + i` for each iteration it
    /// executes. Fails with `AlreadyFilled` on reuse, leaving the
    /// buffer untouched; policy-resolution errors leave the instance
    /// in `Created` so no partial execution ever happens.
    pub fn fill(&mut self, policy: Policy) -> Result<()> {
        if self.state != FillState::Created {
            return Err(FillError::AlreadyFilled);
        }
        let assignment = self.resolve(policy)?;

        self.state = FillState::Filling;
        info!(
            "fill started: policy={}, workers={}, iterations={}, exclusive={}",
            policy,
            self.config.workers,
            self.config.iterations,
            self.buffer.is_exclusive()
        );

        let buffer = &self.buffer;
        match assignment {
            Assignment::Prearranged(ranges) => thread::scope(|scope| {
                for (worker, worker_ranges) in ranges.into_iter().enumerate() {
                    scope.spawn(move || {
                        let label = worker_label(worker);
                        for range in worker_ranges {
                            for _ in range {
                                buffer.append(label);
                            }
                        }
                    });
                }
            }),
            Assignment::OnDemand(queue) => {
                let queue = &queue;
                thread::scope(|scope| {
                    for worker in 0..self.config.workers {
                        scope.spawn(move || {
                            let label = worker_label(worker);
                            while let Some(block) = queue.claim(worker) {
                                for _ in block {
                                    buffer.append(label);
                                }
                            }
                        });
                    }
                });
            }
        }

        self.state = FillState::Filled;
        info!(
            "fill finished: cursor={}, dropped={}",
            self.buffer.cursor(),
            self.buffer.dropped_writes()
        );
        Ok(())
    }

    /// Buffer contents and per-worker occurrence counts
    ///
    /// Valid only after `fill` has returned.
    pub fn readout(&self) -> Result<Readout> {
        if self.state != FillState::Filled {
            return Err(FillError::NotFilled);
        }
        let counts = (0..self.config.workers)
            .map(|worker| {
                let label = worker_label(worker);
                (label, self.buffer.occurrences_of(label))
            })
            .collect();
        Ok(Readout {
            contents: self.buffer.contents(),
            counts,
            cursor: self.buffer.cursor(),
            dropped_writes: self.buffer.dropped_writes(),
        })
    }
}

impl std::fmt::Debug for ParallelFiller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParallelFiller")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("buffer", &self.buffer)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn quick_config() -> FillConfig {
        FillConfig::default().with_delay(Duration::from_micros(10))
    }

    #[test]
    fn test_static_fill_is_complete_and_blocked() {
        let mut filler = ParallelFiller::with_config(quick_config(), true).unwrap();
        filler.fill(Policy::Static).unwrap();

        let readout = filler.readout().unwrap();
        // Contiguous blocks of 20 per worker, fixed up front
        assert_eq!(readout.contents, "A".repeat(20) + &"B".repeat(20) + &"C".repeat(20));
        assert_eq!(readout.cursor, 60);
        assert_eq!(readout.dropped_writes, 0);
    }

    #[test]
    fn test_readout_before_fill_rejected() {
        let filler = ParallelFiller::new(true);
        assert_eq!(filler.readout().unwrap_err(), FillError::NotFilled);
        assert_eq!(filler.state(), FillState::Created);
    }

    #[test]
    fn test_second_fill_rejected_and_state_kept() {
        let mut filler = ParallelFiller::with_config(quick_config(), true).unwrap();
        filler.fill(Policy::Dynamic).unwrap();
        let first = filler.readout().unwrap();

        assert_eq!(filler.fill(Policy::Static).unwrap_err(), FillError::AlreadyFilled);
        assert_eq!(filler.readout().unwrap(), first);
        assert_eq!(filler.state(), FillState::Filled);
    }

    #[test]
    fn test_runtime_defaults_to_static() {
        let mut filler = ParallelFiller::with_config(quick_config(), true).unwrap();
        filler.fill(Policy::Runtime).unwrap();
        let readout = filler.readout().unwrap();
        assert_eq!(readout.contents, "A".repeat(20) + &"B".repeat(20) + &"C".repeat(20));
    }

    #[test]
    fn test_runtime_schedule_injection() {
        let mut filler = ParallelFiller::with_config(quick_config(), true)
            .unwrap()
            .with_runtime_schedule(RuntimeSchedule::with_chunk(Policy::Static, 5));
        filler.fill(Policy::Runtime).unwrap();

        // "static,5" becomes round-robin chunks of 5
        let readout = filler.readout().unwrap();
        let expected: String = "AAAAABBBBBCCCCC".repeat(4);
        assert_eq!(readout.contents, expected);
    }

    #[test]
    fn test_self_referential_runtime_schedule_rejected() {
        let mut filler = ParallelFiller::with_config(quick_config(), true)
            .unwrap()
            .with_runtime_schedule(RuntimeSchedule::new(Policy::Runtime));
        let err = filler.fill(Policy::Runtime).unwrap_err();
        assert!(matches!(err, FillError::UnsupportedPolicy(_)));

        // No partial execution: the instance is still usable
        assert_eq!(filler.state(), FillState::Created);
        filler.fill(Policy::Static).unwrap();
    }

    #[test]
    fn test_auto_fill_is_complete() {
        let mut filler = ParallelFiller::with_config(quick_config(), true).unwrap();
        filler.fill(Policy::Auto).unwrap();
        let readout = filler.readout().unwrap();
        let total: usize = readout.counts.values().sum();
        assert_eq!(total, 60);
    }
}
