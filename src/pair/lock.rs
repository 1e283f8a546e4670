//! Non-blocking reentrancy lock.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::AmmError;

/// A flag that a pair holds for the duration of a mutating operation.
///
/// Acquisition never waits: a second attempt while the flag is set fails
/// with [`AmmError::Reentrancy`]. The returned guard clears the flag on
/// every exit path.
#[derive(Debug, Default)]
pub(crate) struct ReentrancyLock(AtomicBool);

impl ReentrancyLock {
    pub(crate) fn acquire(&self) -> Result<LockGuard<'_>, AmmError> {
        self.0
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .map_err(|_| AmmError::Reentrancy)?;
        Ok(LockGuard(&self.0))
    }

    pub(crate) fn is_locked(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Releases the lock when dropped.
#[must_use = "the lock is released as soon as the guard is dropped"]
pub(crate) struct LockGuard<'a>(&'a AtomicBool);

impl Drop for LockGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn second_acquire_fails_until_release() {
        let lock = ReentrancyLock::default();
        let Ok(guard) = lock.acquire() else {
            panic!("expected lock");
        };
        assert!(lock.is_locked());
        assert!(matches!(lock.acquire(), Err(AmmError::Reentrancy)));
        drop(guard);
        assert!(!lock.is_locked());
        assert!(lock.acquire().is_ok());
    }

    #[test]
    fn released_on_early_return() {
        fn fails(lock: &ReentrancyLock) -> Result<(), AmmError> {
            let _guard = lock.acquire()?;
            Err(AmmError::InvariantViolation)
        }
        let lock = ReentrancyLock::default();
        assert_eq!(fails(&lock), Err(AmmError::InvariantViolation));
        assert!(!lock.is_locked());
    }
}
