//! Raw token amount with checked arithmetic.

use core::fmt;

use super::Rounding;
use crate::math::div_round;

/// A token quantity in the token's smallest unit.
///
/// Amounts never interpret decimals; the ledger that issues a token owns
/// that concern. Arithmetic is checked and returns `None` instead of
/// wrapping; see [`CheckedArithmetic`](crate::math::CheckedArithmetic)
/// for the `Result`-returning forms used inside the exchange.
///
/// # Examples
///
/// ```
/// use pairswap::domain::{Amount, Rounding};
///
/// let reserve = Amount::new(1_000);
/// assert_eq!(reserve.checked_sub(&Amount::new(90)), Some(Amount::new(910)));
/// assert_eq!(Amount::new(10).checked_div(&Amount::new(3), Rounding::Up), Some(Amount::new(4)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[must_use]
pub struct Amount(u128);

impl Amount {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Maximum representable amount.
    pub const MAX: Self = Self(u128::MAX);

    /// Wraps a raw `u128`.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` if the amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition.
    #[must_use]
    pub const fn checked_add(&self, other: &Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked subtraction.
    #[must_use]
    pub const fn checked_sub(&self, other: &Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked multiplication.
    #[must_use]
    pub const fn checked_mul(&self, other: &Self) -> Option<Self> {
        match self.0.checked_mul(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked division with explicit rounding. `None` if `divisor` is zero.
    #[must_use]
    pub const fn checked_div(&self, divisor: &Self, rounding: Rounding) -> Option<Self> {
        match div_round(self.0, divisor.0, rounding) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// `self - other` when positive, zero otherwise.
    ///
    /// Used to derive swap inputs from balance deltas, where "nothing came
    /// in" is a valid observation rather than an error.
    pub const fn saturating_sub(&self, other: &Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl From<u128> for Amount {
    fn from(value: u128) -> Self {
        Self(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants_and_accessors() {
        assert_eq!(Amount::ZERO.get(), 0);
        assert_eq!(Amount::MAX.get(), u128::MAX);
        assert_eq!(Amount::default(), Amount::ZERO);
        assert!(Amount::ZERO.is_zero());
        assert!(!Amount::new(1).is_zero());
    }

    #[test]
    fn checked_ops_detect_overflow_and_underflow() {
        assert_eq!(Amount::MAX.checked_add(&Amount::new(1)), None);
        assert_eq!(Amount::new(1).checked_sub(&Amount::new(2)), None);
        assert_eq!(Amount::MAX.checked_mul(&Amount::new(2)), None);
        assert_eq!(
            Amount::new(6).checked_mul(&Amount::new(7)),
            Some(Amount::new(42))
        );
    }

    #[test]
    fn division_rounds_as_requested() {
        let ten = Amount::new(10);
        let three = Amount::new(3);
        assert_eq!(ten.checked_div(&three, Rounding::Down), Some(Amount::new(3)));
        assert_eq!(ten.checked_div(&three, Rounding::Up), Some(Amount::new(4)));
        assert_eq!(ten.checked_div(&Amount::ZERO, Rounding::Down), None);
    }

    #[test]
    fn saturating_sub_floors_at_zero() {
        assert_eq!(Amount::new(5).saturating_sub(&Amount::new(9)), Amount::ZERO);
        assert_eq!(Amount::new(9).saturating_sub(&Amount::new(5)), Amount::new(4));
    }

    #[test]
    fn display_is_raw_integer() {
        assert_eq!(Amount::new(1_000_000).to_string(), "1000000");
    }
}
