//! primer-par: benchmark the lock-free threaded wheel sieve
//!
//! Usage: cargo run --release -- [-t threads] [-s seconds] [-l limit] [-1] [-p] [-q]

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use primer_par::bench::{format_bytes, run_benchmark};
use primer_par::Config;

#[derive(Parser)]
#[command(name = "primer-par")]
#[command(about = "Lock-free threaded prime sieve benchmark")]
#[command(version)]
struct Cli {
    /// Worker threads (default: one per hardware thread)
    #[arg(short, long, allow_negative_numbers = true, conflicts_with = "oneshot")]
    threads: Option<i64>,

    /// Seconds to keep running passes
    #[arg(short, long, allow_negative_numbers = true, conflicts_with = "oneshot")]
    seconds: Option<i64>,

    /// Find primes below this bound
    #[arg(short, long, allow_negative_numbers = true)]
    limit: Option<i64>,

    /// Run a single pass on a single thread
    #[arg(short = '1', long)]
    oneshot: bool,

    /// Print every prime found
    #[arg(short, long)]
    print: bool,

    /// Only print "passes, average"
    #[arg(short, long)]
    quiet: bool,

    /// Also verify the count against the `primal` crate
    #[arg(long)]
    cross_check: bool,
}

impl Cli {
    fn into_config(self) -> Config {
        let mut config = Config::new(self.limit, self.threads, self.seconds);
        if self.oneshot {
            config = config.oneshot();
        }
        config.print = self.print;
        config.quiet = self.quiet;
        config.cross_check = self.cross_check;
        config
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .init();

    let config = Cli::parse().into_config();

    if !config.quiet {
        println!("🦀 Lock-Free Threaded Wheel Sieve 🦀");
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        if config.oneshot {
            println!("Oneshot is on");
        }
        println!(
            "Computing primes to {} on {} thread{} for {} second{}.",
            config.limit,
            config.threads,
            if config.threads == 1 { "" } else { "s" },
            config.seconds,
            if config.seconds == 1 { "" } else { "s" },
        );
    }

    let (report, sieve) = match run_benchmark(&config) {
        Ok(done) => done,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if config.print {
        let listed: Vec<String> = sieve.primes().map(|p| p.to_string()).collect();
        println!("{}", listed.join(", "));
    }

    if config.quiet {
        println!("{}", report.quiet_line());
    } else {
        println!("Sieve memory: {}", format_bytes(sieve.memory_usage()));
        println!("{}", report);
    }

    if report.succeeded() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
