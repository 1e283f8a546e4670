//! The swap fee charged on every input.

use core::fmt;

use super::basis_points::BPS_DENOMINATOR;
use super::BasisPoints;

/// Swap fee applied to whichever side of a swap receives tokens in.
///
/// The exchange uses a single fee for every pair. The standard 0.30% fee
/// reproduces the `997 / 1000` factor of the classic constant-product
/// formula exactly, with the scale changed from 1 000 to 10 000.
///
/// ```
/// use pairswap::domain::FeeTier;
///
/// let fee = FeeTier::STANDARD;
/// assert_eq!(fee.denominator(), 10_000);
/// assert_eq!(fee.retained(), 9_970);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeeTier(BasisPoints);

impl FeeTier {
    /// 0.30%, the constant-product default.
    pub const STANDARD: Self = Self(BasisPoints::new(30));

    /// Creates a fee tier from arbitrary basis points.
    pub const fn new(basis_points: BasisPoints) -> Self {
        Self(basis_points)
    }

    /// Returns the underlying basis points.
    #[must_use]
    pub const fn basis_points(&self) -> BasisPoints {
        self.0
    }

    /// The scale in which the fee is expressed (10 000).
    #[must_use]
    pub const fn denominator(&self) -> u128 {
        BPS_DENOMINATOR as u128
    }

    /// Fee numerator: `fee / denominator` is the fraction taken.
    #[must_use]
    pub const fn charged(&self) -> u128 {
        self.0.get() as u128
    }

    /// Retained numerator: `retained / denominator` reaches the curve.
    #[must_use]
    pub const fn retained(&self) -> u128 {
        self.0.complement() as u128
    }
}

impl Default for FeeTier {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl fmt::Display for FeeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FeeTier({})", self.0)
    }
}
