//! Injected time source.
//!
//! The ledger never reads the wall clock directly. Every time-dependent
//! computation (parameter ramps, oracle decay, admin claim intervals) goes
//! through a [`Clock`], so simulations and tests can drive time explicitly.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Monotonic source of Unix timestamps in seconds.
pub trait Clock {
    /// Returns the current timestamp.
    fn now(&self) -> u64;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

/// Manually driven clock.
///
/// Clones share the same underlying time, so a test can keep one handle
/// and advance the clock owned by a pool.
///
/// # Examples
///
/// ```
/// use twocrypto_amm::traits::{Clock, ManualClock};
///
/// let clock = ManualClock::new(100);
/// let handle = clock.clone();
/// handle.advance(50);
/// assert_eq!(clock.now(), 150);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    /// Creates a clock frozen at `start`.
    #[must_use]
    pub fn new(start: u64) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(start)),
        }
    }

    /// Sets the current time.
    pub fn set(&self, timestamp: u64) {
        self.now.store(timestamp, Ordering::SeqCst);
    }

    /// Moves time forward by `seconds`, saturating at `u64::MAX`.
    pub fn advance(&self, seconds: u64) {
        let _ = self
            .now
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |t| Some(t.saturating_add(seconds)));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}
