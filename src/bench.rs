//! Repeated-pass benchmark around the threaded sieve.
//!
//! Fresh sieves are built and run back to back until the time budget is
//! spent, then one more sieve is kept for checking and reporting.

use std::fmt;
use std::time::{Duration, Instant};

use tracing::info;

use crate::config::Config;
use crate::error::Result;
use crate::sieve::{run_sieve, PrimeSieve};
use crate::validate::Validation;

/// Completed passes. Owned by the benchmark loop and only bumped there,
/// after a pass's workers have all joined.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PassCounter(u64);

impl PassCounter {
    pub fn record(&mut self) {
        self.0 += 1;
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

#[derive(Debug)]
pub struct BenchReport {
    pub passes: u64,
    pub threads: usize,
    pub elapsed: Duration,
    pub limit: u64,
    /// Primes seen walking the checking sieve.
    pub listed: u64,
    /// Primes reported by `count_primes`.
    pub counted: u64,
    pub validation: Validation,
    /// Result of comparing against `primal`, when requested.
    pub cross_check: Option<bool>,
}

impl BenchReport {
    pub fn average(&self) -> Duration {
        if self.passes == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.elapsed.as_secs_f64() / self.passes as f64)
    }

    /// Known-count validation passed, or the limit is unknown and the
    /// `primal` cross-check agreed.
    pub fn succeeded(&self) -> bool {
        match self.validation {
            Validation::Pass => true,
            Validation::Unknown => self.cross_check == Some(true),
            Validation::Fail { .. } => false,
        }
    }

    /// `passes, average_seconds`
    pub fn quiet_line(&self) -> String {
        format!("{}, {:.6}", self.passes, self.average().as_secs_f64())
    }
}

impl fmt::Display for BenchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Passes: {}, Threads: {}, Time: {:.6}, Average: {:.6}, Limit: {}, Counts: {}/{}, Valid: {}",
            self.passes,
            self.threads,
            self.elapsed.as_secs_f64(),
            self.average().as_secs_f64(),
            self.limit,
            self.listed,
            self.counted,
            self.validation,
        )?;
        if let Some(agreed) = self.cross_check {
            write!(f, ", Cross-check: {}", if agreed { "Pass" } else { "FAIL!" })?;
        }
        Ok(())
    }
}

/// Run the timed passes, then build the checking sieve.
pub fn run_benchmark(config: &Config) -> Result<(BenchReport, PrimeSieve)> {
    let budget = Duration::from_secs(config.seconds);
    let mut passes = PassCounter::default();
    let start = Instant::now();

    loop {
        let sieve = run_sieve(config.limit, config.threads)?;
        std::hint::black_box(&sieve);
        passes.record();
        if config.oneshot || start.elapsed() >= budget {
            break;
        }
    }
    let elapsed = start.elapsed();
    info!(passes = passes.get(), ?elapsed, "benchmark passes complete");

    let checked = run_sieve(config.limit, config.threads)?;
    let counted = checked.count_primes();
    let report = BenchReport {
        passes: passes.get(),
        threads: config.threads,
        elapsed,
        limit: config.limit,
        listed: checked.primes().count() as u64,
        counted,
        validation: checked.validation(),
        cross_check: config
            .cross_check
            .then(|| reference_count(config.limit) == counted),
    };
    Ok((report, checked))
}

/// π of the largest number the sieve represents, counted by `primal`.
pub fn reference_count(limit: u64) -> u64 {
    // 2 and odd limits are themselves represented
    let top = (match limit {
        0..=2 => limit.max(1),
        l if l % 2 == 1 => l,
        l => l - 1,
    }) as usize;
    primal::Sieve::new(top).prime_pi(top) as u64
}

pub fn format_bytes(b: usize) -> String {
    if b < 1024 {
        format!("{} B", b)
    } else if b < 1024 * 1024 {
        format!("{:.1} KB", b as f64 / 1024.0)
    } else {
        format!("{:.1} MB", b as f64 / (1024.0 * 1024.0))
    }
}
