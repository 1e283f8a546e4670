//! Checked arithmetic trait for domain wrapper types.
//!
//! [`CheckedArithmetic`] maps the `Option`-returning checked operations of
//! [`Amount`] and [`Shares`] onto [`AmmError`] variants, so exchange code
//! can chain them with `?`.
//!
//! ```
//! use pairswap::domain::Amount;
//! use pairswap::math::CheckedArithmetic;
//!
//! let reserve = Amount::new(1_000);
//! assert!(reserve.safe_sub(&Amount::new(1_001)).is_err());
//! ```

use crate::domain::{Amount, Rounding, Shares};
use crate::error::AmmError;

/// Fallible arithmetic for domain wrapper types.
///
/// - No panics: every failure is an `Err`.
/// - No saturation: errors propagate instead.
pub trait CheckedArithmetic: Sized {
    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::ArithmeticOverflow`] past the representable range.
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError>;

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Underflow`] if the result would be negative.
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError>;

    /// Checked multiplication.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::ArithmeticOverflow`] past the representable range.
    fn safe_mul(&self, other: &Self) -> Result<Self, AmmError>;

    /// Checked division with explicit [`Rounding`] direction.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::DivisionByZero`] if `other` is zero.
    fn safe_div(&self, other: &Self, rounding: Rounding) -> Result<Self, AmmError>;
}

// ---------------------------------------------------------------------------
// Amount
// ---------------------------------------------------------------------------

impl CheckedArithmetic for Amount {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_add(other)
            .ok_or(AmmError::ArithmeticOverflow("amount addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_sub(other)
            .ok_or(AmmError::Underflow("amount subtraction underflow"))
    }

    #[inline]
    fn safe_mul(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_mul(other)
            .ok_or(AmmError::ArithmeticOverflow("amount multiplication overflow"))
    }

    #[inline]
    fn safe_div(&self, other: &Self, rounding: Rounding) -> Result<Self, AmmError> {
        self.checked_div(other, rounding)
            .ok_or(AmmError::DivisionByZero)
    }
}

// ---------------------------------------------------------------------------
// Shares
// ---------------------------------------------------------------------------

impl CheckedArithmetic for Shares {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_add(other)
            .ok_or(AmmError::ArithmeticOverflow("share addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_sub(other)
            .ok_or(AmmError::Underflow("share subtraction underflow"))
    }

    #[inline]
    fn safe_mul(&self, other: &Self) -> Result<Self, AmmError> {
        self.get()
            .checked_mul(other.get())
            .map(Shares::new)
            .ok_or(AmmError::ArithmeticOverflow("share multiplication overflow"))
    }

    fn safe_div(&self, other: &Self, rounding: Rounding) -> Result<Self, AmmError> {
        super::div_round(self.get(), other.get(), rounding)
            .map(Shares::new)
            .ok_or(AmmError::DivisionByZero)
    }
}
