/*!
 * Shared Buffer
 *
 * Fixed-capacity character buffer with an internal write cursor,
 * appended to concurrently by every worker of one fill run. Appends
 * are either exclusive (the read-write-increment triple is serialized
 * under a blocking mutex) or non-exclusive (the same triple runs
 * unguarded, so the classic read-modify-write race on the cursor is
 * observable: lost updates and stale out-of-range writes).
 *
 * # Defined racy behavior
 *
 * Cells and cursor are relaxed atomics, so the non-exclusive mode is
 * reproducibly racy without undefined behavior. A write whose stale
 * cursor lands at or past capacity is dropped and counted instead of
 * touching memory out of range; the cursor still advances, mirroring
 * the unconditional increment of the unguarded triple.
 */

use crate::core::{SpinDelay, SENTINEL};
use log::warn;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};

/// Shared fixed-size character buffer with a write cursor
pub struct SharedBuffer {
    cells: Vec<AtomicU8>,
    cursor: AtomicUsize,
    /// Out-of-range writes discarded under the drop-and-count policy
    dropped: AtomicUsize,
    exclusive: bool,
    lock: Mutex<()>,
    delay: SpinDelay,
}

impl SharedBuffer {
    /// Create a buffer of `capacity` sentinel cells
    ///
    /// `exclusive` fixes the append mode for the buffer's lifetime.
    pub fn new(capacity: usize, exclusive: bool, delay: SpinDelay) -> Self {
        let cells = (0..capacity)
            .map(|_| AtomicU8::new(SENTINEL as u8))
            .collect();
        Self {
            cells,
            cursor: AtomicUsize::new(0),
            dropped: AtomicUsize::new(0),
            exclusive,
            lock: Mutex::new(()),
            delay,
        }
    }

    /// Append `label` at the current cursor, then advance the cursor
    ///
    /// The artificial delay runs between the cell write and the cursor
    /// increment. In exclusive mode the whole triple is one serialized
    /// critical section; in non-exclusive mode concurrent callers may
    /// interleave anywhere inside it.
    pub fn append(&self, label: char) {
        if self.exclusive {
            let _guard = self.lock.lock();
            self.append_unguarded(label);
        } else {
            self.append_unguarded(label);
        }
    }

    fn append_unguarded(&self, label: char) {
        let idx = self.cursor.load(Ordering::Relaxed);
        if idx < self.cells.len() {
            self.cells[idx].store(label as u8, Ordering::Relaxed);
        } else {
            // Stale cursor raced past capacity: drop and count
            self.dropped.fetch_add(1, Ordering::Relaxed);
            warn!(
                "dropped write of '{}' at index {} (capacity {})",
                label,
                idx,
                self.cells.len()
            );
        }
        self.delay.run();
        self.cursor.store(idx + 1, Ordering::Relaxed);
    }

    /// Count cells currently equal to `label`
    ///
    /// Safe to call only once no append is in flight.
    pub fn occurrences_of(&self, label: char) -> usize {
        let byte = label as u8;
        self.cells
            .iter()
            .filter(|cell| cell.load(Ordering::Relaxed) == byte)
            .count()
    }

    /// Copy of all cells in order, sentinels included
    ///
    /// Never-written cells remain `-`, which is how a non-exclusive
    /// run's skipped indices show up in the readout.
    pub fn contents(&self) -> String {
        self.cells
            .iter()
            .map(|cell| cell.load(Ordering::Relaxed) as char)
            .collect()
    }

    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor.load(Ordering::Relaxed)
    }

    /// Writes discarded because a stale cursor was at or past capacity
    pub fn dropped_writes(&self) -> usize {
        self.dropped.load(Ordering::Relaxed)
    }

    pub fn is_exclusive(&self) -> bool {
        self.exclusive
    }
}

impl std::fmt::Debug for SharedBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedBuffer")
            .field("capacity", &self.cells.len())
            .field("cursor", &self.cursor())
            .field("dropped", &self.dropped_writes())
            .field("exclusive", &self.exclusive)
            .finish()
    }
}
