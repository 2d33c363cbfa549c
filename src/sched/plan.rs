/*!
 * Static Partitioning
 *
 * Pure functions mapping `(iterations, workers, chunk)` to a
 * prearranged per-worker assignment. No threads are involved here:
 * the mapping is fixed before dispatch and reproducible across runs.
 */

use std::ops::Range;

/// Prearranged assignment: for each worker, the iteration ranges it owns
pub type WorkerRanges = Vec<Vec<Range<usize>>>;

/// Divide `[0, iterations)` into one contiguous near-equal block per worker
///
/// The first `iterations % workers` workers receive one extra
/// iteration, so block sizes differ by at most one.
pub fn even_blocks(iterations: usize, workers: usize) -> WorkerRanges {
    let base = iterations / workers;
    let extra = iterations % workers;
    let mut ranges = Vec::with_capacity(workers);
    let mut start = 0;
    for worker in 0..workers {
        let len = base + usize::from(worker < extra);
        ranges.push(vec![start..start + len]);
        start += len;
    }
    ranges
}

/// Divide `[0, iterations)` into `chunk`-sized blocks assigned round-robin
///
/// Block `c` covers `[c * chunk, (c + 1) * chunk)` (final block may be
/// short) and belongs to worker `c % workers`.
pub fn round_robin_chunks(iterations: usize, workers: usize, chunk: usize) -> WorkerRanges {
    let mut ranges: WorkerRanges = vec![Vec::new(); workers];
    let mut start = 0;
    let mut block = 0;
    while start < iterations {
        let end = (start + chunk).min(iterations);
        ranges[block % workers].push(start..end);
        start = end;
        block += 1;
    }
    ranges
}
