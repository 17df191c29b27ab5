//! Reader/writer lock bound to the protected value.
//!
//! [`RwMutex<T>`] grants either one exclusive guard or any number of shared
//! guards at a time.
//!
//! # State machine
//!
//! `Unlocked -> { Exclusive | Shared(n >= 1) } -> Unlocked`
//!
//! | Held                | `lock` | `lock_shared` |
//! |---------------------|--------|---------------|
//! | nothing             | grant  | grant         |
//! | `Shared(n)`         | wait   | grant         |
//! | `Exclusive`         | wait   | wait          |
//!
//! Fairness is the one `parking_lot::RwLock` provides: a waiting writer
//! blocks new shared acquisitions, and the lock hands off fairly when guards
//! are held long enough to warrant it. Shared acquisition is not recursive
//! while a writer may be queued; a thread that already holds a shared guard
//! must not block on a second one.
//!
//! # Example
//!
//! ```
//! use lockbound::sync::RwMutex;
//!
//! let table = RwMutex::new(vec![1, 2, 3]);
//!
//! {
//!     let a = table.lock_shared();
//!     let b = table.try_lock_shared().expect("shared guards coexist");
//!     assert_eq!(a.len() + b.len(), 6);
//!     assert!(table.try_lock().is_none());
//! }
//!
//! table.lock().push(4);
//! assert_eq!(table.lock_shared().len(), 4);
//! ```

use parking_lot::RwLock as ParkingRwLock;
use std::fmt;
use std::ops::{Deref, DerefMut};

use super::metrics::{HoldToken, LockMetrics, LockMetricsSnapshot};

const DEFAULT_NAME: &str = "rwmutex";

/// A reader/writer wrapper that owns its protected value.
///
/// Like [`Mutex`](super::Mutex), acquisition never fails and the lock is
/// released during unwinding if a guard holder panics.
pub struct RwMutex<T> {
    inner: ParkingRwLock<T>,
    name: &'static str,
    metrics: LockMetrics,
}

impl<T> RwMutex<T> {
    /// Creates a new, unlocked reader/writer mutex holding `value`.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self::with_name(DEFAULT_NAME, value)
    }

    /// Creates a new reader/writer mutex whose name labels log events and
    /// metrics.
    #[must_use]
    pub fn with_name(name: &'static str, value: T) -> Self {
        Self {
            inner: ParkingRwLock::new(value),
            name,
            metrics: LockMetrics::default(),
        }
    }

    /// Blocks until no guard of either kind is held, then returns an
    /// exclusive read/write guard.
    pub fn lock(&self) -> RwMutexGuard<'_, T> {
        let start = self.metrics.start_wait();
        let (guard, contended) = match self.inner.try_write() {
            Some(guard) => (guard, false),
            None => {
                tracing::trace!(
                    lock = self.name,
                    kind = "exclusive",
                    "rwmutex contended, blocking"
                );
                (self.inner.write(), true)
            }
        };
        RwMutexGuard {
            guard,
            _hold: self.metrics.record_acquire(start, contended),
        }
    }

    /// Attempts to acquire an exclusive guard without blocking.
    ///
    /// Returns `None` if any guard is currently held.
    pub fn try_lock(&self) -> Option<RwMutexGuard<'_, T>> {
        let guard = self.inner.try_write()?;
        Some(RwMutexGuard {
            guard,
            _hold: self.metrics.record_try_acquire(),
        })
    }

    /// Blocks until no exclusive guard is held, then returns a shared,
    /// read-only guard.
    pub fn lock_shared(&self) -> RwMutexSharedGuard<'_, T> {
        let start = self.metrics.start_wait();
        let (guard, contended) = match self.inner.try_read() {
            Some(guard) => (guard, false),
            None => {
                tracing::trace!(lock = self.name, kind = "shared", "rwmutex contended, blocking");
                (self.inner.read(), true)
            }
        };
        RwMutexSharedGuard {
            guard,
            _hold: self.metrics.record_acquire(start, contended),
        }
    }

    /// Attempts to acquire a shared guard without blocking.
    ///
    /// Returns `None` if an exclusive guard is held or a writer is queued.
    pub fn try_lock_shared(&self) -> Option<RwMutexSharedGuard<'_, T>> {
        let guard = self.inner.try_read()?;
        Some(RwMutexSharedGuard {
            guard,
            _hold: self.metrics.record_try_acquire(),
        })
    }

    /// Returns true if any guard, shared or exclusive, is held.
    #[inline]
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.inner.is_locked()
    }

    /// Returns true if an exclusive guard is held.
    #[inline]
    #[must_use]
    pub fn is_locked_exclusive(&self) -> bool {
        self.inner.is_locked_exclusive()
    }

    /// Returns the lock name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns a snapshot of the contention metrics.
    #[must_use]
    pub fn snapshot(&self) -> LockMetricsSnapshot {
        self.metrics.snapshot(self.name)
    }

    /// Resets all metrics to zero.
    pub fn reset_metrics(&self) {
        self.metrics.reset();
    }

    /// Consumes the lock, returning the protected value.
    pub fn into_inner(self) -> T {
        self.inner.into_inner()
    }
}

impl<T: Default> Default for RwMutex<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> From<T> for RwMutex<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: fmt::Debug> fmt::Debug for RwMutex<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("RwMutex");
        d.field("name", &self.name);
        match self.inner.try_read() {
            Some(guard) => d.field("data", &&*guard),
            None => d.field("data", &format_args!("<locked>")),
        };
        d.finish()
    }
}

/// Exclusive read/write guard returned by [`RwMutex::lock`].
#[must_use = "if unused the RwMutex will immediately unlock"]
pub struct RwMutexGuard<'a, T> {
    guard: parking_lot::RwLockWriteGuard<'a, T>,
    _hold: HoldToken<'a>,
}

impl<T> Deref for RwMutexGuard<'_, T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.guard
    }
}

impl<T> DerefMut for RwMutexGuard<'_, T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut T {
        &mut self.guard
    }
}

impl<T: fmt::Debug> fmt::Debug for RwMutexGuard<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RwMutexGuard")
            .field("data", &&*self.guard)
            .finish()
    }
}

/// Shared read-only guard returned by [`RwMutex::lock_shared`].
#[must_use = "if unused the RwMutex will immediately unlock"]
pub struct RwMutexSharedGuard<'a, T> {
    guard: parking_lot::RwLockReadGuard<'a, T>,
    _hold: HoldToken<'a>,
}

impl<T> Deref for RwMutexSharedGuard<'_, T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.guard
    }
}

impl<T: fmt::Debug> fmt::Debug for RwMutexSharedGuard<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RwMutexSharedGuard")
            .field("data", &&*self.guard)
            .finish()
    }
}
