//! Fallible results and the propagation discipline.
//!
//! The fallible-result type is [`core::result::Result`]. The [`Result`]
//! alias defined here mirrors the engine defaults: a unit success payload
//! and a `String` error.
//!
//! # Propagation
//!
//! Failures are propagated with the `?` operator. It returns `Err` built
//! from the same error value (converted through `From` when the caller's
//! error type differs) and skips the rest of the function. A discarded
//! `Result` is rejected at build time because the crate denies
//! `unused_must_use`.
//!
//! ```
//! use lockbound::result::Result;
//!
//! fn parse(raw: &str) -> Result<u32> {
//!     raw.parse().map_err(|_| format!("not a number: {raw}"))
//! }
//!
//! fn sum(a: &str, b: &str) -> Result<u32> {
//!     let a = parse(a)?;
//!     let b = parse(b)?;
//!     Ok(a + b)
//! }
//!
//! assert_eq!(sum("2", "3"), Ok(5));
//! assert_eq!(sum("x", "3"), Err("not a number: x".to_string()));
//! ```
//!
//! # Consuming accessors
//!
//! [`ResultExt::consume_ok`] and [`ResultExt::consume_err`] move the
//! payload out. Calling either on the wrong variant is fatal. Both take
//! `self`, so the moved-from value cannot be queried again:
//!
//! ```compile_fail
//! use lockbound::result::ResultExt;
//!
//! let r: Result<u32, String> = Ok(1);
//! let first = r.consume_ok();
//! let second = r.consume_ok();
//! ```

use crate::error::{ContractViolation, fatal};

/// Result with the engine defaults: no success payload, `String` error.
pub type Result<V = (), E = String> = core::result::Result<V, E>;

/// Consuming accessors for [`Result`](core::result::Result).
///
/// Unlike `unwrap`, these do not require the other payload to implement
/// `Debug`; the violation itself is what gets reported.
pub trait ResultExt<V, E> {
    /// Moves the success value out.
    ///
    /// # Panics
    ///
    /// Panics through [`fatal`] with [`ContractViolation::OkOnErr`] if the
    /// result holds `Err`.
    fn consume_ok(self) -> V;

    /// Moves the error value out.
    ///
    /// # Panics
    ///
    /// Panics through [`fatal`] with [`ContractViolation::ErrOnOk`] if the
    /// result holds `Ok`.
    fn consume_err(self) -> E;
}

impl<V, E> ResultExt<V, E> for core::result::Result<V, E> {
    #[inline]
    #[track_caller]
    fn consume_ok(self) -> V {
        match self {
            Ok(value) => value,
            Err(_) => fatal(ContractViolation::OkOnErr),
        }
    }

    #[inline]
    #[track_caller]
    fn consume_err(self) -> E {
        match self {
            Ok(_) => fatal(ContractViolation::ErrOnOk),
            Err(err) => err,
        }
    }
}
