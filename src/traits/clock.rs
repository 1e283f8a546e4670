//! Time source for accumulators and deadlines.

/// Seconds since an arbitrary epoch.
///
/// Pairs read it when updating price accumulators; the router reads it
/// once at entry to check deadlines. Readings should not go backwards.
pub trait Clock: Send + Sync {
    /// Current time in seconds.
    fn now(&self) -> u64;
}
