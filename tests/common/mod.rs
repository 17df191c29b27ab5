//! Shared helpers for integration tests.

#![allow(dead_code)]

use proptest::prelude::ProptestConfig;
use std::str::FromStr;

/// Installs a test-writer `tracing` subscriber once per test binary.
///
/// The level comes from `TEST_LOG_LEVEL` and defaults to `info`.
pub fn init_test_logging() {
    let level = std::env::var("TEST_LOG_LEVEL")
        .ok()
        .and_then(|s| tracing::Level::from_str(&s).ok())
        .unwrap_or(tracing::Level::INFO);
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_test_writer()
        .try_init();
}

/// Proptest configuration with `cases` cases, overridable through
/// `PROPTEST_CASES`.
pub fn test_proptest_config(cases: u32) -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(cases);
    ProptestConfig::with_cases(cases)
}

/// Phase tracking macro for structured test logging.
#[macro_export]
macro_rules! test_phase {
    ($name:expr) => {
        tracing::info!(test = $name, "=== TEST START ===");
    };
}

/// Assertion with logging for better test output.
#[macro_export]
macro_rules! assert_with_log {
    ($cond:expr, $msg:expr, $expected:expr, $actual:expr) => {
        let cond: bool = $cond;
        if !cond {
            tracing::error!(
                message = $msg,
                expected = ?$expected,
                actual = ?$actual,
                "Assertion failed"
            );
        }
        assert!(cond, "{}: expected {:?}, got {:?}", $msg, $expected, $actual);
    };
}
