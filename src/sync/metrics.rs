//! Feature-gated lock contention metrics.
//!
//! When the `lock-metrics` feature is enabled, every [`Mutex`] and
//! [`RwMutex`] tracks wait time, hold time, contention count, and total
//! acquisitions. When disabled, the tracking types are zero-sized and every
//! recording call compiles away.
//!
//! [`Mutex`]: crate::sync::Mutex
//! [`RwMutex`]: crate::sync::RwMutex

/// Snapshot of lock contention metrics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LockMetricsSnapshot {
    /// Human-readable name for this lock.
    pub name: &'static str,
    /// Total number of successful acquisitions (exclusive and shared).
    pub acquisitions: u64,
    /// Number of blocking acquisitions that found the lock already held.
    pub contentions: u64,
    /// Cumulative nanoseconds spent waiting to acquire the lock.
    pub wait_ns: u64,
    /// Cumulative nanoseconds the lock was held.
    pub hold_ns: u64,
    /// Maximum single wait duration in nanoseconds.
    pub max_wait_ns: u64,
    /// Maximum single hold duration in nanoseconds.
    pub max_hold_ns: u64,
}

#[cfg(feature = "lock-metrics")]
mod inner {
    use super::LockMetricsSnapshot;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::Instant;

    /// Counters split into two cache lines: the first is written on
    /// acquisition, the second on release.
    #[derive(Debug)]
    #[repr(C)]
    pub(crate) struct LockMetrics {
        acquisitions: AtomicU64,
        contentions: AtomicU64,
        wait_ns: AtomicU64,
        max_wait_ns: AtomicU64,
        _pad: [u8; 32],
        hold_ns: AtomicU64,
        max_hold_ns: AtomicU64,
    }

    /// Start of a blocking wait.
    pub(crate) struct WaitStart(Instant);

    /// Records hold time when dropped.
    ///
    /// Guards declare this after the underlying lock guard so the lock is
    /// released before the counters are touched.
    pub(crate) struct HoldToken<'a> {
        metrics: &'a LockMetrics,
        acquired_at: Instant,
    }

    impl Default for LockMetrics {
        fn default() -> Self {
            Self {
                acquisitions: AtomicU64::new(0),
                contentions: AtomicU64::new(0),
                wait_ns: AtomicU64::new(0),
                max_wait_ns: AtomicU64::new(0),
                _pad: [0; 32],
                hold_ns: AtomicU64::new(0),
                max_hold_ns: AtomicU64::new(0),
            }
        }
    }

    fn elapsed_ns(since: Instant) -> u64 {
        u64::try_from(since.elapsed().as_nanos()).unwrap_or(u64::MAX)
    }

    impl LockMetrics {
        fn update_max(current: &AtomicU64, value: u64) {
            let mut old = current.load(Ordering::Relaxed);
            while value > old {
                match current.compare_exchange_weak(
                    old,
                    value,
                    Ordering::Relaxed,
                    Ordering::Relaxed,
                ) {
                    Ok(_) => break,
                    Err(actual) => old = actual,
                }
            }
        }

        #[inline]
        pub(crate) fn start_wait(&self) -> WaitStart {
            WaitStart(Instant::now())
        }

        pub(crate) fn record_acquire(&self, start: WaitStart, contended: bool) -> HoldToken<'_> {
            let wait_ns = elapsed_ns(start.0);
            self.acquisitions.fetch_add(1, Ordering::Relaxed);
            self.wait_ns.fetch_add(wait_ns, Ordering::Relaxed);
            Self::update_max(&self.max_wait_ns, wait_ns);
            if contended {
                self.contentions.fetch_add(1, Ordering::Relaxed);
            }
            self.hold()
        }

        /// Counts an uncontended, non-blocking acquisition.
        pub(crate) fn record_try_acquire(&self) -> HoldToken<'_> {
            self.acquisitions.fetch_add(1, Ordering::Relaxed);
            self.hold()
        }

        fn hold(&self) -> HoldToken<'_> {
            HoldToken {
                metrics: self,
                acquired_at: Instant::now(),
            }
        }

        pub(crate) fn snapshot(&self, name: &'static str) -> LockMetricsSnapshot {
            LockMetricsSnapshot {
                name,
                acquisitions: self.acquisitions.load(Ordering::Relaxed),
                contentions: self.contentions.load(Ordering::Relaxed),
                wait_ns: self.wait_ns.load(Ordering::Relaxed),
                hold_ns: self.hold_ns.load(Ordering::Relaxed),
                max_wait_ns: self.max_wait_ns.load(Ordering::Relaxed),
                max_hold_ns: self.max_hold_ns.load(Ordering::Relaxed),
            }
        }

        pub(crate) fn reset(&self) {
            self.acquisitions.store(0, Ordering::Relaxed);
            self.contentions.store(0, Ordering::Relaxed);
            self.wait_ns.store(0, Ordering::Relaxed);
            self.hold_ns.store(0, Ordering::Relaxed);
            self.max_wait_ns.store(0, Ordering::Relaxed);
            self.max_hold_ns.store(0, Ordering::Relaxed);
        }
    }

    impl Drop for HoldToken<'_> {
        fn drop(&mut self) {
            let hold_ns = elapsed_ns(self.acquired_at);
            self.metrics.hold_ns.fetch_add(hold_ns, Ordering::Relaxed);
            LockMetrics::update_max(&self.metrics.max_hold_ns, hold_ns);
        }
    }
}

#[cfg(not(feature = "lock-metrics"))]
mod inner {
    use super::LockMetricsSnapshot;
    use std::marker::PhantomData;

    /// Zero-sized stand-in (metrics disabled).
    #[derive(Debug, Default)]
    pub(crate) struct LockMetrics;

    pub(crate) struct WaitStart;

    pub(crate) struct HoldToken<'a>(PhantomData<&'a LockMetrics>);

    impl LockMetrics {
        #[inline]
        pub(crate) fn start_wait(&self) -> WaitStart {
            WaitStart
        }

        #[inline]
        pub(crate) fn record_acquire(&self, _start: WaitStart, _contended: bool) -> HoldToken<'_> {
            HoldToken(PhantomData)
        }

        #[inline]
        pub(crate) fn record_try_acquire(&self) -> HoldToken<'_> {
            HoldToken(PhantomData)
        }

        pub(crate) fn snapshot(&self, name: &'static str) -> LockMetricsSnapshot {
            LockMetricsSnapshot {
                name,
                ..Default::default()
            }
        }

        #[inline]
        pub(crate) fn reset(&self) {}
    }
}

pub(crate) use inner::{HoldToken, LockMetrics};
