//! Integration tests for the primer-par binary.

use assert_cmd::Command;
use predicates::prelude::*;

fn primer_cmd() -> Command {
    Command::cargo_bin("primer-par").unwrap()
}

#[test]
fn test_help_flag() {
    primer_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--threads"))
        .stdout(predicate::str::contains("--oneshot"));
}

#[test]
fn test_oneshot_known_limit_passes() {
    primer_cmd()
        .args(["--oneshot", "--limit", "1000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Oneshot is on"))
        .stdout(predicate::str::contains("Passes: 1, Threads: 1"))
        .stdout(predicate::str::contains("Counts: 168/168, Valid: Pass"));
}

#[test]
fn test_quiet_output() {
    primer_cmd()
        .args(["-1", "-q", "-l", "100"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("1, "))
        .stdout(predicate::str::contains("Computing").not());
}

#[test]
fn test_print_primes() {
    primer_cmd()
        .args(["-1", "-q", "-p", "-l", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2, 3, 5, 7\n"));
}

#[test]
fn test_threads_and_seconds() {
    primer_cmd()
        .args(["-t", "4", "-s", "1", "-l", "100000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("on 4 threads for 1 second."))
        .stdout(predicate::str::contains("Threads: 4"))
        .stdout(predicate::str::contains("Counts: 9592/9592, Valid: Pass"));
}

#[test]
fn test_unknown_limit_fails_validation() {
    primer_cmd()
        .args(["-1", "-l", "11"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Valid: FAIL!"));
}

#[test]
fn test_unknown_limit_with_cross_check() {
    primer_cmd()
        .args(["-1", "-l", "500000", "--cross-check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Counts: 41538/41538"))
        .stdout(predicate::str::contains("Cross-check: Pass"));
}

#[test]
fn test_invalid_values_are_clamped() {
    primer_cmd()
        .args(["-t", "0", "-s", "-3", "-l", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("on 1 thread for 1 second."));
}

#[test]
fn test_rust_log_level_overrides_default() {
    primer_cmd()
        .env("RUST_LOG", "debug")
        .args(["-1", "-q", "-l", "1000"])
        .assert()
        .success()
        .stderr(predicate::str::contains("sieve run starting"));
}

#[test]
fn test_default_log_level_is_quiet() {
    primer_cmd()
        .env_remove("RUST_LOG")
        .args(["-1", "-q", "-l", "1000"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_huge_thread_count_is_capped() {
    primer_cmd()
        .args(["-t", "9223372036854775807", "-s", "1", "-l", "1000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("on 1024 threads"))
        .stdout(predicate::str::contains("Counts: 168/168, Valid: Pass"));
}

#[test]
fn test_sieve_memory_reported() {
    primer_cmd()
        .args(["-1", "-l", "1000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sieve memory: 64 B"));
}

#[test]
fn test_oneshot_conflicts_with_threads() {
    primer_cmd()
        .args(["-1", "-t", "4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}
