/*!
 * Core Module
 * Shared types, error taxonomy, and the race-window delay primitive
 */

pub mod delay;
pub mod errors;
pub mod types;

pub use delay::SpinDelay;
pub use errors::{FillError, Result};
pub use types::{worker_label, FillConfig, FillState, SENTINEL};
