//! Lock wrappers that bind a value to its lock.
//!
//! Each wrapper owns exactly one value and one lock. The value is reachable
//! only through a guard, and a guard releases its claim exactly once when it
//! is dropped, on every exit path: normal return, `?` propagation, or
//! unwinding.
//!
//! # Primitives
//!
//! - [`Mutex`]: Exclusive access, with read/write and read-only guards
//! - [`RwMutex`]: One exclusive guard or any number of shared guards
//!
//! # Blocking and non-blocking acquisition
//!
//! - `lock` / `lock_shared` park the calling thread until the requested
//!   access is available. There is no timeout or cancellation.
//! - `try_*` variants never park. Contention is reported as `None`, not as
//!   an error: it is an expected condition the caller may retry.
//!
//! Wrappers are shared between threads the usual way, behind an `Arc` or a
//! scoped borrow. Moving a wrapper is always allowed while no guard borrows
//! it; the borrow checker rejects a move while a guard is alive.

mod metrics;
mod mutex;
mod rwmutex;

pub use metrics::LockMetricsSnapshot;
pub use mutex::{Mutex, MutexGuard, MutexReadOnlyGuard};
pub use rwmutex::{RwMutex, RwMutexGuard, RwMutexSharedGuard};
