//! Per-worker marking loop.
//!
//! A runner walks its wheel rows and strikes the multiples of each row's
//! `6k - 1` and `6k + 1` candidate. The candidate check reads the shared
//! store without synchronization: another worker may not have struck a
//! composite candidate yet, in which case its multiples are struck twice.
//! Both outcomes leave the store correct since clears are idempotent.

use tracing::trace;

use crate::bits::BitStore;
use crate::math::isqrt;
use crate::wheel::WheelCursor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerState {
    /// Deciding what the current row needs, or finishing.
    Advancing,
    /// Striking multiples of `6k - 1`.
    MarkingPairA,
    /// Striking multiples of `6k + 1`, then moving to the next row.
    MarkingPairB,
    Done,
}

/// What one runner did, reported after it finishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunnerStats {
    pub worker: usize,
    pub rows: u64,
    pub factors_struck: u64,
}

#[derive(Debug)]
pub struct SieveRunner<'a> {
    store: &'a BitStore,
    cursor: WheelCursor,
    root: u64,
    state: RunnerState,
    stats: RunnerStats,
}

impl<'a> SieveRunner<'a> {
    pub fn new(store: &'a BitStore, worker: usize) -> Self {
        Self {
            store,
            cursor: WheelCursor::new(worker, store.workers()),
            root: isqrt(store.limit()),
            state: RunnerState::Advancing,
            stats: RunnerStats {
                worker,
                ..RunnerStats::default()
            },
        }
    }

    pub fn state(&self) -> RunnerState {
        self.state
    }

    /// Perform one transition and return the new state.
    pub fn step(&mut self) -> RunnerState {
        self.state = match self.state {
            RunnerState::Advancing => {
                if !self.cursor.in_range(self.root) {
                    RunnerState::Done
                } else if self.cursor.owns_threes() {
                    // odd multiples of 3 from 9
                    self.store.clear_multiples(9, 6);
                    self.next_row();
                    RunnerState::Advancing
                } else {
                    RunnerState::MarkingPairA
                }
            }
            RunnerState::MarkingPairA => {
                if let Some((a, _)) = self.cursor.pair() {
                    self.strike(a);
                }
                RunnerState::MarkingPairB
            }
            RunnerState::MarkingPairB => {
                if let Some((_, b)) = self.cursor.pair() {
                    self.strike(b);
                }
                self.next_row();
                RunnerState::Advancing
            }
            RunnerState::Done => RunnerState::Done,
        };
        self.state
    }

    /// Step until done.
    pub fn run(mut self) -> RunnerStats {
        while self.step() != RunnerState::Done {}
        trace!(
            worker = self.stats.worker,
            rows = self.stats.rows,
            struck = self.stats.factors_struck,
            "sieve worker finished"
        );
        self.stats
    }

    fn strike(&mut self, factor: u64) {
        if self.store.is_prime(factor) {
            self.store.clear_multiples(factor * factor, 2 * factor);
            self.stats.factors_struck += 1;
        }
    }

    fn next_row(&mut self) {
        self.cursor.advance();
        self.stats.rows += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sieve_sequential(limit: u64, workers: usize) -> BitStore {
        let store = BitStore::new(limit, workers).unwrap();
        for w in 0..workers {
            SieveRunner::new(&store, w).run();
        }
        store
    }

    #[test]
    fn test_single_worker_known_counts() {
        assert_eq!(sieve_sequential(10, 1).count_primes(), 4);
        assert_eq!(sieve_sequential(100, 1).count_primes(), 25);
        assert_eq!(sieve_sequential(1_000, 1).count_primes(), 168);
        assert_eq!(sieve_sequential(10_000, 1).count_primes(), 1_229);
    }

    #[test]
    fn test_worker_zero_state_sequence() {
        let store = BitStore::new(100, 1).unwrap();
        let mut runner = SieveRunner::new(&store, 0);
        assert_eq!(runner.state(), RunnerState::Advancing);
        // row 0: multiples of 3, no pair
        assert_eq!(runner.step(), RunnerState::Advancing);
        assert!(!store.is_prime(9) && !store.is_prime(99));
        // row 1: 5 and 7
        assert_eq!(runner.step(), RunnerState::MarkingPairA);
        assert_eq!(runner.step(), RunnerState::MarkingPairB);
        assert!(!store.is_prime(25));
        assert_eq!(runner.step(), RunnerState::Advancing);
        assert!(!store.is_prime(49));
        // row 2: 11 > sqrt(100)
        assert_eq!(runner.step(), RunnerState::Done);
        assert_eq!(runner.step(), RunnerState::Done);
    }

    #[test]
    fn test_worker_out_of_range_is_done_immediately() {
        let store = BitStore::new(20, 4).unwrap();
        let mut runner = SieveRunner::new(&store, 3);
        assert_eq!(runner.step(), RunnerState::Done);
        let stats = SieveRunner::new(&store, 3).run();
        assert_eq!(stats, RunnerStats { worker: 3, rows: 0, factors_struck: 0 });
    }

    #[test]
    fn test_interleaved_steps_match_sequential() {
        // round-robin single steps across runners, a deterministic stand-in
        // for arbitrary thread interleavings
        let limit = 50_000;
        let workers = 5;
        let expected: Vec<u64> = sieve_sequential(limit, workers).primes().collect();

        let store = BitStore::new(limit, workers).unwrap();
        let mut runners: Vec<_> = (0..workers).map(|w| SieveRunner::new(&store, w)).collect();
        while runners.iter().any(|r| r.state() != RunnerState::Done) {
            for r in runners.iter_mut().rev() {
                r.step();
            }
        }
        assert_eq!(store.primes().collect::<Vec<_>>(), expected);
        assert_eq!(expected.len(), 5_133);
    }

    #[test]
    fn test_composite_candidate_is_redundant_not_wrong() {
        // 25 = 6·4 + 1 is a composite candidate; striking it again changes nothing
        let store = sieve_sequential(1_000, 1);
        let before: Vec<u64> = store.primes().collect();
        store.clear_multiples(25 * 25, 50);
        assert_eq!(store.primes().collect::<Vec<_>>(), before);
    }
}
