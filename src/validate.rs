//! Post-run check against historically known prime counts.
//!
//! This table isn't used by the sieve itself, only to confirm a finished
//! run found the right number of primes.

use std::fmt;

/// π(limit) for the limits the benchmark is normally run at.
pub const KNOWN_COUNTS: [(u64, u64); 10] = [
    (10, 4),
    (100, 25),
    (1_000, 168),
    (10_000, 1_229),
    (100_000, 9_592),
    (1_000_000, 78_498),
    (10_000_000, 664_579),
    (100_000_000, 5_761_455),
    (1_000_000_000, 50_847_534),
    (10_000_000_000, 455_052_511),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validation {
    Pass,
    Fail { expected: u64, observed: u64 },
    /// The limit isn't in the table; the count could not be checked.
    Unknown,
}

impl Validation {
    pub fn passed(&self) -> bool {
        matches!(self, Validation::Pass)
    }
}

impl fmt::Display for Validation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Validation::Pass => write!(f, "Pass"),
            Validation::Fail { .. } | Validation::Unknown => write!(f, "FAIL!"),
        }
    }
}

pub fn known_count(limit: u64) -> Option<u64> {
    KNOWN_COUNTS
        .iter()
        .find(|&&(l, _)| l == limit)
        .map(|&(_, count)| count)
}

pub fn check(limit: u64, observed: u64) -> Validation {
    match known_count(limit) {
        None => Validation::Unknown,
        Some(expected) if expected == observed => Validation::Pass,
        Some(expected) => Validation::Fail { expected, observed },
    }
}

/// `false` both for a wrong count and for a limit that can't be checked.
pub fn validate(limit: u64, observed: u64) -> bool {
    check(limit, observed).passed()
}
