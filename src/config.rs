//! Resolved benchmark settings.
//!
//! Out-of-range requests are repaired rather than rejected: anything below
//! 1 becomes 1, and thread requests above [`MAX_WORKERS`] are lowered to it.

use std::thread;

pub const DEFAULT_LIMIT: u64 = 10_000_000;
pub const DEFAULT_SECONDS: u64 = 5;
/// Upper bound on requested threads; larger requests are lowered to it.
pub const MAX_WORKERS: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub limit: u64,
    pub threads: usize,
    pub seconds: u64,
    /// Exactly one pass on one thread.
    pub oneshot: bool,
    pub print: bool,
    pub quiet: bool,
    /// Also count primes with `primal` and compare.
    pub cross_check: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            threads: default_threads(),
            seconds: DEFAULT_SECONDS,
            oneshot: false,
            print: false,
            quiet: false,
            cross_check: false,
        }
    }
}

impl Config {
    /// Apply requested values over the defaults, clamping each to at least 1
    /// and threads to at most [`MAX_WORKERS`].
    pub fn new(limit: Option<i64>, threads: Option<i64>, seconds: Option<i64>) -> Self {
        let defaults = Self::default();
        Self {
            limit: limit.map_or(defaults.limit, |v| v.max(1) as u64),
            threads: threads.map_or(defaults.threads, |v| {
                usize::try_from(v.clamp(1, MAX_WORKERS as i64)).unwrap_or(MAX_WORKERS)
            }),
            seconds: seconds.map_or(defaults.seconds, |v| v.max(1) as u64),
            ..defaults
        }
    }

    /// Switch to a single pass on a single thread.
    pub fn oneshot(mut self) -> Self {
        self.oneshot = true;
        self.threads = 1;
        self
    }
}

/// One worker per hardware thread, falling back to 1 when unknown.
pub fn default_threads() -> usize {
    thread::available_parallelism().map_or(1, |n| n.get().min(MAX_WORKERS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::new(None, None, None);
        assert_eq!(config.limit, DEFAULT_LIMIT);
        assert_eq!(config.seconds, DEFAULT_SECONDS);
        assert!(config.threads >= 1);
        assert!(!config.oneshot);
    }

    #[test]
    fn test_clamps_to_one() {
        let config = Config::new(Some(0), Some(-3), Some(-1));
        assert_eq!(config.limit, 1);
        assert_eq!(config.threads, 1);
        assert_eq!(config.seconds, 1);
    }

    #[test]
    fn test_huge_thread_count_is_capped() {
        let config = Config::new(None, Some(i64::MAX), None);
        assert_eq!(config.threads, MAX_WORKERS);
        assert_eq!(Config::new(None, Some(MAX_WORKERS as i64), None).threads, MAX_WORKERS);
    }

    #[test]
    fn test_requested_values() {
        let config = Config::new(Some(1_000), Some(8), Some(2));
        assert_eq!((config.limit, config.threads, config.seconds), (1_000, 8, 2));
    }

    #[test]
    fn test_oneshot_forces_single_thread() {
        let config = Config::new(Some(100), Some(4), None).oneshot();
        assert!(config.oneshot);
        assert_eq!(config.threads, 1);
    }
}
