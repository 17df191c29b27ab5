//! Shared helpers for unit tests.
//!
//! Tests call [`init_test_logging`] once at the start and bracket their
//! body with [`test_phase!`](crate::test_phase) and
//! [`test_complete!`](crate::test_complete) so failures can be located in
//! captured output. Verbosity comes from `TEST_LOG_LEVEL` (default `info`).

use std::str::FromStr;

/// Installs a `tracing` subscriber that writes through the test harness.
///
/// Safe to call from every test; only the first call installs anything.
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

/// Phase tracking macro for structured test logging.
#[macro_export]
macro_rules! test_phase {
    ($name:expr) => {
        tracing::info!(test = $name, "=== TEST START ===");
    };
}

/// Marks the successful end of a test.
#[macro_export]
macro_rules! test_complete {
    ($name:expr) => {
        tracing::info!(test = $name, "=== TEST COMPLETE ===");
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

#[cfg(test)]
mod tests {
    use super::init_test_logging;
    use std::cell::Cell;

    #[test]
    fn assert_with_log_evaluates_condition_once() {
        init_test_logging();
        crate::test_phase!("assert_with_log_evaluates_condition_once");
        let calls = Cell::new(0);
        let bump = || {
            calls.set(calls.get() + 1);
            true
        };
        crate::assert_with_log!(bump(), "condition holds", true, true);
        let seen = calls.get();
        crate::assert_with_log!(seen == 1, "condition evaluated once", 1, seen);
        crate::test_complete!("assert_with_log_evaluates_condition_once");
    }
}
