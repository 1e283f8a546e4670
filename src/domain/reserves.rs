//! Reserve snapshots and cumulative price observations.

use super::Amount;

/// Reserves of a pair as last observed, with the time they were recorded.
///
/// `reserve_a` always belongs to the canonical first token of the pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reserves {
    /// Reserve of the canonical first token.
    pub reserve_a: Amount,
    /// Reserve of the canonical second token.
    pub reserve_b: Amount,
    /// Clock reading (seconds) of the last reserve update.
    pub last_update: u64,
}

impl Reserves {
    /// Creates a reserve snapshot.
    pub const fn new(reserve_a: Amount, reserve_b: Amount, last_update: u64) -> Self {
        Self {
            reserve_a,
            reserve_b,
            last_update,
        }
    }

    /// `true` while either side is zero, meaning the pair cannot price.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.reserve_a.is_zero() || self.reserve_b.is_zero()
    }

    /// Returns `(reserve_in, reserve_out)` when trading from the first
    /// token (`from_first == true`) or from the second.
    #[must_use]
    pub const fn oriented(&self, from_first: bool) -> (Amount, Amount) {
        if from_first {
            (self.reserve_a, self.reserve_b)
        } else {
            (self.reserve_b, self.reserve_a)
        }
    }
}

/// Fractional bits of the UQ64.64 encoding used by the accumulators.
pub const PRICE_FRACTION_BITS: u32 = 64;

/// Time-integrated prices of a pair.
///
/// Each accumulator sums `price * elapsed_seconds`, with `price` encoded
/// as UQ64.64. `price_a_cumulative` integrates the price of the first token
/// in units of the second (`reserve_b / reserve_a`); `price_b_cumulative`
/// integrates the inverse. The sums wrap modulo 2^128, so only differences
/// between two observations carry meaning.
///
/// ```
/// use pairswap::domain::PriceCumulative;
///
/// let one = 1u128 << 64;
/// let t0 = PriceCumulative::new(0, 0, 100);
/// let t1 = PriceCumulative::new(one * 10, one * 40, 110);
/// assert_eq!(t1.average_price_a(&t0), Some(one));
/// assert_eq!(t1.average_price_b(&t0), Some(one * 4));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PriceCumulative {
    /// Integrated price of the first token (UQ64.64 seconds, wrapping).
    pub price_a_cumulative: u128,
    /// Integrated price of the second token (UQ64.64 seconds, wrapping).
    pub price_b_cumulative: u128,
    /// Clock reading the accumulators were brought up to.
    pub timestamp: u64,
}

impl PriceCumulative {
    /// Creates an observation.
    pub const fn new(price_a_cumulative: u128, price_b_cumulative: u128, timestamp: u64) -> Self {
        Self {
            price_a_cumulative,
            price_b_cumulative,
            timestamp,
        }
    }

    /// Time-weighted average price of the first token since `earlier`, as
    /// UQ64.64. `None` when no time has elapsed between the observations.
    #[must_use]
    pub fn average_price_a(&self, earlier: &Self) -> Option<u128> {
        let elapsed = self.elapsed_since(earlier)?;
        Some(
            self.price_a_cumulative
                .wrapping_sub(earlier.price_a_cumulative)
                / elapsed,
        )
    }

    /// Time-weighted average price of the second token since `earlier`.
    #[must_use]
    pub fn average_price_b(&self, earlier: &Self) -> Option<u128> {
        let elapsed = self.elapsed_since(earlier)?;
        Some(
            self.price_b_cumulative
                .wrapping_sub(earlier.price_b_cumulative)
                / elapsed,
        )
    }

    fn elapsed_since(&self, earlier: &Self) -> Option<u128> {
        match self.timestamp.checked_sub(earlier.timestamp) {
            Some(0) | None => None,
            Some(dt) => Some(u128::from(dt)),
        }
    }
}
