/*!
 * Scheduling
 *
 * Policy enumeration and the two assignment mechanisms behind it:
 * prearranged partitioning (static variants) computed as pure
 * functions, and on-demand doling (dynamic and guided variants)
 * through a shared work queue.
 */

mod plan;
mod policy;
mod queue;

pub use plan::{even_blocks, round_robin_chunks, WorkerRanges};
pub use policy::{Policy, RuntimeSchedule};
pub use queue::{Grant, WorkQueue};
