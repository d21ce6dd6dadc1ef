//! Error types for sieve construction and runs

use thiserror::Error;

/// Failures that abort a sieve run. None of them leave a usable sieve behind.
#[derive(Error, Debug)]
pub enum SieveError {
    #[error("limit {limit} needs more cells than this platform can address")]
    CapacityOverflow { limit: u64 },

    #[error("could not allocate {bytes} bytes for a sieve up to {limit}")]
    Allocation { limit: u64, bytes: usize },

    #[error("failed to spawn sieve worker {worker}: {source}")]
    Spawn {
        worker: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("sieve worker {worker} panicked")]
    WorkerPanicked { worker: usize },
}

pub type Result<T> = std::result::Result<T, SieveError>;
