//! Threaded sieve: one fresh OS thread per worker, joined before results
//! are readable.

use std::thread;

use tracing::{debug, warn};

use crate::bits::BitStore;
use crate::error::{Result, SieveError};
use crate::runner::{RunnerStats, SieveRunner};
use crate::validate::{self, Validation};

#[derive(Debug)]
pub struct PrimeSieve {
    store: BitStore,
}

impl PrimeSieve {
    /// Allocate a sieve for `limit` worked by `workers` threads.
    /// Both are clamped to at least 1.
    pub fn new(limit: u64, workers: usize) -> Result<Self> {
        Ok(Self {
            store: BitStore::new(limit, workers)?,
        })
    }

    pub fn limit(&self) -> u64 {
        self.store.limit()
    }

    pub fn workers(&self) -> usize {
        self.store.workers()
    }

    pub fn memory_usage(&self) -> usize {
        self.store.memory_usage()
    }

    /// Strike every composite, blocking until all workers have joined.
    ///
    /// Meant to be called once per sieve.
    pub fn run(&mut self) -> Result<Vec<RunnerStats>> {
        let store = &self.store;
        let workers = store.workers();
        debug!(limit = store.limit(), workers, "sieve run starting");

        let stats = thread::scope(|s| -> Result<Vec<RunnerStats>> {
            let mut handles = Vec::new();
            for worker in 0..workers {
                let handle = thread::Builder::new()
                    .name(format!("sieve-worker-{}", worker))
                    .spawn_scoped(s, move || SieveRunner::new(store, worker).run())
                    .map_err(|source| SieveError::Spawn { worker, source })?;
                handles.push(handle);
            }

            handles
                .into_iter()
                .enumerate()
                .map(|(worker, h)| h.join().map_err(|_| SieveError::WorkerPanicked { worker }))
                .collect::<Result<Vec<_>>>()
        })?;

        debug!(
            limit = store.limit(),
            factors = stats.iter().map(|s| s.factors_struck).sum::<u64>(),
            "sieve run finished"
        );
        Ok(stats)
    }

    pub fn is_prime(&self, n: u64) -> bool {
        self.store.is_prime(n)
    }

    pub fn count_primes(&self) -> u64 {
        self.store.count_primes()
    }

    pub fn primes(&self) -> impl Iterator<Item = u64> + '_ {
        self.store.primes()
    }

    pub fn validation(&self) -> Validation {
        let result = validate::check(self.limit(), self.count_primes());
        match result {
            Validation::Pass => debug!(limit = self.limit(), "prime count validated"),
            Validation::Fail { expected, observed } => {
                warn!(limit = self.limit(), expected, observed, "prime count mismatch")
            }
            Validation::Unknown => debug!(limit = self.limit(), "no known count for limit"),
        }
        result
    }

    pub fn validate(&self) -> bool {
        self.validation().passed()
    }
}

/// Build and run a sieve in one call; the store is only handed out once
/// every worker has finished.
pub fn run_sieve(limit: u64, workers: usize) -> Result<PrimeSieve> {
    let mut sieve = PrimeSieve::new(limit, workers)?;
    sieve.run()?;
    Ok(sieve)
}
