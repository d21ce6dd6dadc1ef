//! 6k±1 wheel partitioning of candidate factors across workers.
//!
//! Lay the integers out in six columns:
//!
//! ```text
//!  1  2  3  4  5  6
//!  7  8  9 10 11 12
//! 13 14 15 16 17 18
//! ```
//!
//! Past 3, columns 2, 3, 4 and 6 are always composite, so every prime is
//! `6k - 1` or `6k + 1`. Worker `i` starts on row `i` and then jumps
//! `workers` rows at a time, taking both candidates of each row. Rows are
//! not filtered by primality up front; a candidate that turns out composite
//! just costs a redundant marking pass.

/// Position of one worker in the wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WheelCursor {
    index: u64,
    stride: u64,
}

impl WheelCursor {
    /// Cursor for worker `worker` out of `workers`.
    pub fn new(worker: usize, workers: usize) -> Self {
        Self {
            index: worker as u64,
            stride: workers.max(1) as u64,
        }
    }

    pub fn index(&self) -> u64 {
        self.index
    }

    /// Row 0 owns the multiples of 3, the one prime the wheel leaves out.
    pub fn owns_threes(&self) -> bool {
        self.index == 0
    }

    /// `6·index - 1`, or `None` on row 0 where it would be -1.
    pub fn factor(&self) -> Option<u64> {
        (6 * self.index).checked_sub(1)
    }

    /// The `6k - 1` / `6k + 1` candidates of the current row.
    pub fn pair(&self) -> Option<(u64, u64)> {
        self.factor().map(|f| (f, f + 2))
    }

    /// True while the row's factor is still a useful sieving factor for
    /// a bound whose integer square root is `root`.
    pub fn in_range(&self, root: u64) -> bool {
        self.factor().map_or(true, |f| f <= root)
    }

    pub fn advance(&mut self) {
        self.index += self.stride;
    }
}
