/*!
 * Core Types
 * Fill configuration, worker labels, and the fill state machine
 */

use super::errors::{FillError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Character marking a buffer cell that was never written
pub const SENTINEL: char = '-';

/// Label identifying the worker that executed an iteration
///
/// Workers are numbered from 0 and labeled 'A', 'B', 'C', ...
pub fn worker_label(worker: usize) -> char {
    (b'A' + worker as u8) as char
}

/// Immutable fill configuration
///
/// Constants of the original demonstration (3 workers, 60 iterations,
/// chunk 5) are the defaults; independent instances can override them,
/// so multiple fillers coexist in tests without process-wide state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillConfig {
    /// Number of worker threads spawned for one fill
    pub workers: usize,
    /// Total iteration count; also the buffer capacity
    pub iterations: usize,
    /// Block size used by the chunked policies
    pub chunk: usize,
    /// Artificial CPU-bound delay widening the race window
    pub delay: Duration,
}

impl FillConfig {
    /// Validate counts before any thread is spawned
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(FillError::InvalidConfig("workers must be > 0".into()));
        }
        if self.workers > 26 {
            return Err(FillError::InvalidConfig(
                "at most 26 workers (one letter label each)".into(),
            ));
        }
        if self.iterations == 0 {
            return Err(FillError::InvalidConfig("iterations must be > 0".into()));
        }
        if self.chunk == 0 {
            return Err(FillError::InvalidConfig("chunk must be > 0".into()));
        }
        Ok(())
    }

    /// Override the race-window delay
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl Default for FillConfig {
    fn default() -> Self {
        Self {
            workers: 3,
            iterations: 60,
            chunk: 5,
            delay: Duration::from_micros(200),
        }
    }
}

/// Lifecycle of a ParallelFiller instance
///
/// `fill` drives Created -> Filling -> Filled; `readout` is only valid
/// in Filled, and a second `fill` is rejected rather than overrunning
/// the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FillState {
    Created,
    Filling,
    Filled,
}
