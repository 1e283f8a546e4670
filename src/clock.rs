//! [`Clock`] implementations.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::traits::Clock;

/// Wall-clock seconds since the Unix epoch.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

/// A clock that only moves when told to.
///
/// ```
/// use pairswap::clock::ManualClock;
/// use pairswap::traits::Clock;
///
/// let clock = ManualClock::new(1_000);
/// clock.advance(15);
/// assert_eq!(clock.now(), 1_015);
/// ```
#[derive(Debug, Default)]
pub struct ManualClock(AtomicU64);

impl ManualClock {
    /// Starts at `start` seconds.
    #[must_use]
    pub const fn new(start: u64) -> Self {
        Self(AtomicU64::new(start))
    }

    /// Jumps to `now`.
    pub fn set(&self, now: u64) {
        self.0.store(now, Ordering::SeqCst);
    }

    /// Moves forward by `seconds` and returns the new reading.
    pub fn advance(&self, seconds: u64) -> u64 {
        let previous = self.0.fetch_add(seconds, Ordering::SeqCst);
        previous.saturating_add(seconds)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }
}
