//! Liquidity share units.

use core::fmt;

use super::Amount;

/// A quantity of a pair's liquidity shares.
///
/// Shares are fungible claims on a proportional slice of both reserves.
/// They are kept distinct from [`Amount`] so token quantities and share
/// quantities cannot be mixed up in the pricing formulas.
///
/// ```
/// use pairswap::domain::Shares;
///
/// let a = Shares::new(1_000);
/// assert_eq!(a.checked_add(&Shares::new(24)), Some(Shares::new(1_024)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shares(u128);

impl Shares {
    /// No shares.
    pub const ZERO: Self = Self(0);

    /// Unlimited allowance marker.
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

    /// Returns `true` if there are no shares.
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

    /// Reinterprets the raw value as a token [`Amount`].
    ///
    /// Only meaningful where a formula mixes the two units, such as the
    /// geometric mean of a first deposit.
    pub const fn as_amount(&self) -> Amount {
        Amount::new(self.0)
    }
}

impl fmt::Display for Shares {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
