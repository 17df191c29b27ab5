//! # lockbound
//!
//! Building blocks shared across the engine:
//!
//! - [`sync`]: [`Mutex`](sync::Mutex) and [`RwMutex`](sync::RwMutex), which
//!   own their value so it can only be reached through a guard
//! - [`option`] and [`result`]: accessors and conventions for the optional
//!   and fallible types every component returns
//! - [`wire`]: the byte codec used to persist values, including the
//!   presence-flag layout for optional values
//! - [`error`]: contract violations and the fatal path
//!
//! ## Case analysis
//!
//! `Option` and `Result` are closed sums. Code that needs to handle each
//! variant uses `match`; the compiler rejects a match that misses a
//! variant, and each arm receives the payload by value when the scrutinee
//! is moved in:
//!
//! ```compile_fail
//! fn describe(r: Result<u32, String>) -> String {
//!     match r {
//!         Ok(n) => n.to_string(),
//!     }
//! }
//! ```
//!
//! ## Error handling
//!
//! Expected failures travel as `Err` / `None` and are propagated with `?`.
//! Lock contention is `None` from the `try_*` methods. Accessor misuse is a
//! bug and panics through [`error::fatal`].
//!
//! ## Features
//!
//! - `lock-metrics`: per-lock acquisition, contention, wait and hold
//!   counters, read through `snapshot()`.
//!
//! ## Example
//!
//! ```
//! use lockbound::option::OptionExt;
//! use lockbound::sync::Mutex;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let hits = Arc::new(Mutex::with_name("hits", 0_u32));
//! let workers: Vec<_> = (0..4)
//!     .map(|_| {
//!         let hits = Arc::clone(&hits);
//!         thread::spawn(move || *hits.lock() += 1)
//!     })
//!     .collect();
//! for w in workers {
//!     w.join().unwrap();
//! }
//! assert_eq!(*hits.lock(), 4);
//!
//! let cached: Option<u32> = hits.try_lock().map(|g| *g);
//! assert_eq!(*cached.value(), 4);
//! ```

#![deny(unused_must_use)]

pub mod error;
pub mod option;
pub mod result;
pub mod sync;
pub mod wire;

#[cfg(test)]
pub(crate) mod test_utils;

pub use error::ContractViolation;
pub use option::OptionExt;
pub use result::ResultExt;
pub use sync::{Mutex, RwMutex};
