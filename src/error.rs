//! Contract violations and the fatal path.
//!
//! Error handling in this crate follows two rules:
//!
//! - Expected failures are typed values returned through `Result` or
//!   `Option` and propagated with `?`. Lock contention is reported as an
//!   empty `Option`, never as an error.
//! - Misusing an accessor (taking the success value out of an `Err`, the
//!   error out of an `Ok`, or the payload out of a `None`) is a bug in the
//!   caller. It is reported through [`fatal`], which never returns.
//!
//! # Error Categories
//!
//! - **Recoverable**: [`SerializerError`](crate::wire::SerializerError) and
//!   whatever error types callers carry in their own `Result`s.
//! - **Contract violations**: [`ContractViolation`], always fatal.

use core::fmt;

/// The kind of accessor misuse that was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContractViolation {
    /// The payload of an `Option` was requested while it held `None`.
    EmptyOption,
    /// The success value was consumed from a `Result` holding `Err`.
    OkOnErr,
    /// The error value was consumed from a `Result` holding `Ok`.
    ErrOnOk,
}

impl ContractViolation {
    /// Returns a short, stable message for the violation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::EmptyOption => "value() called on an option that contained no value",
            Self::OkOnErr => "consume_ok() called on a result that contained an err value",
            Self::ErrOnOk => "consume_err() called on a result that contained an ok value",
        }
    }
}

impl fmt::Display for ContractViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reports a contract violation and unwinds.
///
/// The violation is logged at `error` level before the panic so it shows up
/// in collected traces even when the panic message is swallowed by a
/// supervisor.
#[cold]
#[inline(never)]
#[track_caller]
pub fn fatal(violation: ContractViolation) -> ! {
    let location = core::panic::Location::caller();
    tracing::error!(
        violation = %violation,
        file = location.file(),
        line = location.line(),
        "contract violation"
    );
    panic!("{violation}");
}
