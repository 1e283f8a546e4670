//! Basis-point representation for fee fractions.

use core::fmt;

/// Denominator that represents 100%.
pub const BPS_DENOMINATOR: u32 = 10_000;

/// A fraction expressed in basis points (1 bp = 0.01%, 10 000 bp = 100%).
///
/// Any `u32` can be stored; [`is_valid_fraction`](Self::is_valid_fraction)
/// tells whether the value makes sense as a fee.
///
/// # Examples
///
/// ```
/// use pairswap::domain::BasisPoints;
///
/// let bp = BasisPoints::new(30);
/// assert_eq!(bp.complement(), 9_970);
/// assert!(bp.is_valid_fraction());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BasisPoints(u32);

impl BasisPoints {
    /// 0%.
    pub const ZERO: Self = Self(0);

    /// 100%.
    pub const FULL: Self = Self(BPS_DENOMINATOR);

    /// Wraps a raw basis-point value.
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// `true` for values strictly below 100%.
    ///
    /// A fee of 100% leaves nothing to price, so it is rejected by config
    /// validation.
    #[must_use]
    pub const fn is_valid_fraction(&self) -> bool {
        self.0 < BPS_DENOMINATOR
    }

    /// The retained fraction, `10 000 - self`, saturating at zero.
    #[must_use]
    pub const fn complement(&self) -> u32 {
        BPS_DENOMINATOR.saturating_sub(self.0)
    }
}

impl fmt::Display for BasisPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bp", self.0)
    }
}
