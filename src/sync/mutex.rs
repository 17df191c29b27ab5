//! Mutual exclusion bound to the protected value.
//!
//! [`Mutex<T>`] owns its value and its lock together. The value is reachable
//! only through a guard; there is no accessor that hands out a reference
//! outside a guard's lifetime, and the borrow checker ties every reference
//! derived from a guard to that guard:
//!
//! ```compile_fail
//! use lockbound::sync::Mutex;
//!
//! let mutex = Mutex::new(5);
//! let escaped: &i32 = {
//!     let guard = mutex.lock();
//!     &*guard
//! };
//! ```
//!
//! # State machine
//!
//! `Unlocked -> Locked -> Unlocked`. The lock is not reentrant: acquiring it
//! again from the thread that already holds it deadlocks.
//!
//! # Example
//!
//! ```
//! use lockbound::sync::Mutex;
//!
//! let counter = Mutex::new(0_u64);
//! *counter.lock() += 1;
//!
//! let held = counter.lock();
//! assert!(counter.try_lock().is_none());
//! drop(held);
//! assert_eq!(*counter.try_lock().expect("lock is free"), 1);
//! ```

use parking_lot::Mutex as ParkingMutex;
use std::fmt;
use std::ops::{Deref, DerefMut};

use super::metrics::{HoldToken, LockMetrics, LockMetricsSnapshot};

const DEFAULT_NAME: &str = "mutex";

/// A mutual exclusion wrapper that owns its protected value.
///
/// Acquisition never fails: `parking_lot` locks do not poison, so a panic
/// while a guard is alive releases the lock during unwinding and leaves the
/// value as the panicking thread left it.
pub struct Mutex<T> {
    inner: ParkingMutex<T>,
    name: &'static str,
    metrics: LockMetrics,
}

impl<T> Mutex<T> {
    /// Creates a new, unlocked mutex holding `value`.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self::with_name(DEFAULT_NAME, value)
    }

    /// Creates a new mutex whose name labels log events and metrics.
    #[must_use]
    pub fn with_name(name: &'static str, value: T) -> Self {
        Self {
            inner: ParkingMutex::new(value),
            name,
            metrics: LockMetrics::default(),
        }
    }

    /// Blocks until the lock is free and returns a read/write guard.
    pub fn lock(&self) -> MutexGuard<'_, T> {
        let start = self.metrics.start_wait();
        let (guard, contended) = match self.inner.try_lock() {
            Some(guard) => (guard, false),
            None => {
                tracing::trace!(lock = self.name, kind = "exclusive", "mutex contended, blocking");
                (self.inner.lock(), true)
            }
        };
        MutexGuard {
            guard,
            _hold: self.metrics.record_acquire(start, contended),
        }
    }

    /// Attempts to acquire the lock without blocking.
    ///
    /// Returns `None` if the lock is currently held.
    pub fn try_lock(&self) -> Option<MutexGuard<'_, T>> {
        let guard = self.inner.try_lock()?;
        Some(MutexGuard {
            guard,
            _hold: self.metrics.record_try_acquire(),
        })
    }

    /// Blocks until the lock is free and returns a guard that only reads.
    ///
    /// The claim is exclusive, like [`lock`](Self::lock).
    pub fn lock_read_only(&self) -> MutexReadOnlyGuard<'_, T> {
        MutexReadOnlyGuard { inner: self.lock() }
    }

    /// Attempts to acquire a read-only exclusive guard without blocking.
    pub fn try_lock_read_only(&self) -> Option<MutexReadOnlyGuard<'_, T>> {
        self.try_lock().map(|inner| MutexReadOnlyGuard { inner })
    }

    /// Returns true if some guard currently holds the lock.
    #[inline]
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.inner.is_locked()
    }

    /// Returns the lock name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns a snapshot of the contention metrics.
    ///
    /// Only the name is populated unless the `lock-metrics` feature is on.
    #[must_use]
    pub fn snapshot(&self) -> LockMetricsSnapshot {
        self.metrics.snapshot(self.name)
    }

    /// Resets all metrics to zero.
    pub fn reset_metrics(&self) {
        self.metrics.reset();
    }

    /// Consumes the mutex, returning the protected value.
    pub fn into_inner(self) -> T {
        self.inner.into_inner()
    }
}

impl<T: Default> Default for Mutex<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> From<T> for Mutex<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: fmt::Debug> fmt::Debug for Mutex<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("Mutex");
        d.field("name", &self.name);
        match self.inner.try_lock() {
            Some(guard) => d.field("data", &&*guard),
            None => d.field("data", &format_args!("<locked>")),
        };
        d.finish()
    }
}

/// Exclusive read/write guard returned by [`Mutex::lock`].
///
/// Releases the lock exactly once when dropped.
#[must_use = "if unused the Mutex will immediately unlock"]
pub struct MutexGuard<'a, T> {
    guard: parking_lot::MutexGuard<'a, T>,
    // Dropped after `guard`, so hold time is recorded once the lock is free.
    _hold: HoldToken<'a>,
}

impl<T> Deref for MutexGuard<'_, T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.guard
    }
}

impl<T> DerefMut for MutexGuard<'_, T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut T {
        &mut self.guard
    }
}

impl<T: fmt::Debug> fmt::Debug for MutexGuard<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MutexGuard")
            .field("data", &&*self.guard)
            .finish()
    }
}

/// Exclusive guard that exposes only shared references to the value.
#[must_use = "if unused the Mutex will immediately unlock"]
pub struct MutexReadOnlyGuard<'a, T> {
    inner: MutexGuard<'a, T>,
}

impl<T> Deref for MutexReadOnlyGuard<'_, T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.inner
    }
}

impl<T: fmt::Debug> fmt::Debug for MutexReadOnlyGuard<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MutexReadOnlyGuard")
            .field("data", &&**self)
            .finish()
    }
}
