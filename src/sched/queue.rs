/*!
 * Work Queue
 *
 * On-demand doling for the dynamic and guided policies: whichever
 * worker becomes free next claims the next block of iterations,
 * first-come-first-served. Grant sizing is decided under the queue's
 * own lock, so no iteration is ever handed out twice.
 */

use log::trace;
use parking_lot::Mutex;
use std::ops::Range;

/// Grant-sizing rule for one fill run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grant {
    /// Every claim receives exactly `size` iterations (final one may be short)
    Fixed(usize),
    /// Claims shrink with the remaining work: `max(remaining / workers, floor)`
    Guided { workers: usize, floor: usize },
}

/// Shared doler over the iteration space `[0, total)`
#[derive(Debug)]
pub struct WorkQueue {
    total: usize,
    next: Mutex<usize>,
    grant: Grant,
}

impl WorkQueue {
    pub fn new(total: usize, grant: Grant) -> Self {
        Self {
            total,
            next: Mutex::new(0),
            grant,
        }
    }

    /// Claim the next block, or `None` once the space is exhausted
    pub fn claim(&self, worker: usize) -> Option<Range<usize>> {
        let mut next = self.next.lock();
        if *next >= self.total {
            return None;
        }
        let remaining = self.total - *next;
        let size = match self.grant {
            Grant::Fixed(size) => size,
            Grant::Guided { workers, floor } => (remaining / workers).max(floor),
        };
        let start = *next;
        let end = (start + size).min(self.total);
        *next = end;
        drop(next);

        trace!("worker {} claimed iterations {}..{}", worker, start, end);
        Some(start..end)
    }

    pub fn total(&self) -> usize {
        self.total
    }
}
