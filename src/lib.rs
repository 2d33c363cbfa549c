/*!
 * parfill
 *
 * Demonstrates how loop-scheduling policies and the presence or
 * absence of mutual exclusion affect correctness and thread-work
 * distribution when parallel workers write into one shared,
 * fixed-size buffer.
 */

pub mod buffer;
pub mod core;
pub mod fill;
pub mod sched;

// Re-exports
pub use crate::core::{worker_label, FillConfig, FillError, FillState, Result, SpinDelay, SENTINEL};
pub use buffer::SharedBuffer;
pub use fill::{ParallelFiller, Readout};
pub use sched::{Policy, RuntimeSchedule};
