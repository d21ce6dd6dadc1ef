//! Lock-free threaded Sieve of Eratosthenes over a 6k±1 wheel.
//!
//! ```no_run
//! let sieve = primer_par::run_sieve(1_000_000, 4)?;
//! assert_eq!(sieve.count_primes(), 78_498);
//! assert!(sieve.validate());
//! # Ok::<(), primer_par::SieveError>(())
//! ```

pub mod bench;
pub mod bits;
pub mod config;
pub mod error;
pub mod math;
pub mod runner;
pub mod sieve;
pub mod validate;
pub mod wheel;

pub use bits::BitStore;
pub use config::Config;
pub use error::{Result, SieveError};
pub use sieve::{run_sieve, PrimeSieve};
pub use validate::Validation;
