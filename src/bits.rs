//! Bit-packed odd-only primality store shared by every sieve worker.
//!
//! Cell `i` stands for the odd number `2i + 1`; cells are single bits packed
//! 64 to an [`AtomicU64`] word. A set bit means "possibly prime".
//!
//! Workers write concurrently without locks. That is sound because the only
//! mutation is clearing a bit, which is idempotent and monotone, and because
//! every clear is one indivisible `fetch_and` on the whole word: a clear of
//! bit 5 can never race with a clear of bit 6 and resurrect it. `Relaxed`
//! ordering is enough since nothing is published through these words before
//! the workers are joined.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{Result, SieveError};

/// Shared sieve state for one run.
#[derive(Debug)]
pub struct BitStore {
    words: Box<[AtomicU64]>,
    cells: usize,
    limit: u64,
    workers: usize,
}

impl BitStore {
    /// Allocate `ceil(limit / 2)` cells, all set except cell 0 (the number 1).
    ///
    /// `limit` and `workers` below 1 are clamped to 1.
    pub fn new(limit: u64, workers: usize) -> Result<Self> {
        let limit = limit.max(1);
        let workers = workers.max(1);

        let cells = usize::try_from(limit / 2 + limit % 2)
            .map_err(|_| SieveError::CapacityOverflow { limit })?;
        let num_words = cells.div_ceil(64);

        let mut words: Vec<AtomicU64> = Vec::new();
        words.try_reserve_exact(num_words).map_err(|_| SieveError::Allocation {
            limit,
            bytes: num_words.saturating_mul(std::mem::size_of::<AtomicU64>()),
        })?;
        words.extend((0..num_words).map(|_| AtomicU64::new(!0u64)));

        // Bits past the last cell stay zero so popcount over words is exact
        let tail = cells & 63;
        if tail != 0 {
            *words[num_words - 1].get_mut() = (1u64 << tail) - 1;
        }

        // Bit 0 represents 1 — not prime
        *words[0].get_mut() &= !1u64;

        Ok(Self {
            words: words.into_boxed_slice(),
            cells,
            limit,
            workers,
        })
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Number of odd-number cells.
    pub fn len(&self) -> usize {
        self.cells
    }

    /// Always false: `limit` is clamped to at least 1, so there is at
    /// least the cell for the number 1.
    pub fn is_empty(&self) -> bool {
        self.cells == 0
    }

    /// Largest odd number that has a cell.
    pub fn last_odd(&self) -> u64 {
        2 * (self.cells as u64 - 1) + 1
    }

    /// Heap bytes held by the word array.
    pub fn memory_usage(&self) -> usize {
        self.words.len() * std::mem::size_of::<AtomicU64>()
    }

    /// Read cell `index`. Out-of-range cells read as not prime.
    ///
    /// The load is unsynchronized with respect to other workers: during a
    /// run it may return a stale `true`, which only costs redundant marking.
    #[inline]
    pub fn get(&self, index: usize) -> bool {
        if index >= self.cells {
            return false;
        }
        (self.words[index >> 6].load(Ordering::Relaxed) >> (index & 63)) & 1 == 1
    }

    /// Mark cell `index` composite. Never sets a bit.
    #[inline]
    pub fn clear(&self, index: usize) {
        debug_assert!(index < self.cells, "cell {} out of range {}", index, self.cells);
        self.words[index >> 6].fetch_and(!(1u64 << (index & 63)), Ordering::Relaxed);
    }

    /// Mark `start, start + step, ...` composite, up to the last cell.
    /// `start` and `step` are odd numbers, not cell indices.
    pub fn clear_multiples(&self, start: u64, step: u64) {
        let last = self.last_odd();
        let mut num = start;
        while num <= last {
            self.clear((num >> 1) as usize);
            num += step;
        }
    }

    pub fn is_prime(&self, n: u64) -> bool {
        if n & 1 == 1 {
            usize::try_from(n >> 1).map_or(false, |i| self.get(i))
        } else {
            n == 2 && self.limit >= 2
        }
    }

    /// 2 (when in range) plus every set cell.
    pub fn count_primes(&self) -> u64 {
        let odd: u64 = self
            .words
            .iter()
            .map(|w| w.load(Ordering::Relaxed).count_ones() as u64)
            .sum();
        u64::from(self.limit >= 2) + odd
    }

    /// All primes in the store, ascending.
    pub fn primes(&self) -> impl Iterator<Item = u64> + '_ {
        let two = (self.limit >= 2).then_some(2u64);
        let odd = self.words.iter().enumerate().flat_map(|(wi, w)| {
            SetBits {
                word: w.load(Ordering::Relaxed),
                base: (wi as u64) << 6,
            }
            .map(|i| 2 * i + 1)
        });
        two.into_iter().chain(odd)
    }
}

/// Indices of the set bits of one word, lowest first (Brian Kernighan).
struct SetBits {
    word: u64,
    base: u64,
}

impl Iterator for SetBits {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.word == 0 {
            return None;
        }
        let tz = self.word.trailing_zeros() as u64;
        self.word &= self.word - 1; // clear lowest set bit
        Some(self.base + tz)
    }
}
