/*!
 * Scheduling Policies
 *
 * The eight loop-scheduling policies as a closed enum, plus the
 * runtime-schedule indirection: `Runtime` defers the concrete choice
 * to an injected `RuntimeSchedule` resolved when the fill executes,
 * keeping the core free of environment-variable coupling.
 */

use crate::core::errors::{FillError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the iteration space is partitioned across workers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Policy {
    /// One contiguous near-equal block per worker, fixed up front
    Static,
    /// Fixed-size blocks of `chunk` iterations, round-robin up front
    StaticChunk,
    /// Iterations doled out one at a time, first-come-first-served
    Dynamic,
    /// Dynamic doling in blocks of `chunk` iterations
    DynamicChunk,
    /// Dynamic doling with grants that shrink as work runs out
    Guided,
    /// Guided doling with a minimum grant of `chunk` iterations
    GuidedChunk,
    /// Defer to the runtime schedule injected into the filler
    Runtime,
    /// Let the implementation pick; no guarantee which strategy
    Auto,
}

impl Policy {
    /// All eight policies, in demonstration order
    pub const ALL: [Policy; 8] = [
        Policy::Static,
        Policy::StaticChunk,
        Policy::Dynamic,
        Policy::DynamicChunk,
        Policy::Guided,
        Policy::GuidedChunk,
        Policy::Runtime,
        Policy::Auto,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Policy::Static => "static",
            Policy::StaticChunk => "static-chunk",
            Policy::Dynamic => "dynamic",
            Policy::DynamicChunk => "dynamic-chunk",
            Policy::Guided => "guided",
            Policy::GuidedChunk => "guided-chunk",
            Policy::Runtime => "runtime",
            Policy::Auto => "auto",
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Policy {
    type Err = FillError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "static" => Ok(Policy::Static),
            "static-chunk" => Ok(Policy::StaticChunk),
            "dynamic" => Ok(Policy::Dynamic),
            "dynamic-chunk" => Ok(Policy::DynamicChunk),
            "guided" => Ok(Policy::Guided),
            "guided-chunk" => Ok(Policy::GuidedChunk),
            "runtime" => Ok(Policy::Runtime),
            "auto" => Ok(Policy::Auto),
            other => Err(FillError::UnsupportedPolicy(other.into())),
        }
    }
}

/// Ambient schedule consulted when `Policy::Runtime` is dispatched
///
/// Holds a concrete policy and an optional chunk override, injected at
/// filler construction rather than read from the environment. The
/// nested policy must itself be concrete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeSchedule {
    pub policy: Policy,
    pub chunk: Option<usize>,
}

impl RuntimeSchedule {
    pub fn new(policy: Policy) -> Self {
        Self {
            policy,
            chunk: None,
        }
    }

    pub fn with_chunk(policy: Policy, chunk: usize) -> Self {
        Self {
            policy,
            chunk: Some(chunk),
        }
    }

    /// Reject self-referential schedules before any thread is spawned
    pub fn validate(&self) -> Result<()> {
        match self.policy {
            Policy::Runtime | Policy::Auto => Err(FillError::UnsupportedPolicy(format!(
                "runtime schedule must name a concrete policy, got {}",
                self.policy
            ))),
            _ => Ok(()),
        }
    }
}

impl Default for RuntimeSchedule {
    /// Unset runtime schedules fall back to static partitioning
    fn default() -> Self {
        Self::new(Policy::Static)
    }
}
