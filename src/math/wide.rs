//! 256-bit intermediates for products of two `u128` quantities.
//!
//! Reserve products, fee-scaled balances and share formulas all multiply
//! two 128-bit values before dividing. [`U256`] holds those products
//! exactly, and [`U512`] holds products of two fee-scaled balances.
//! [`narrow`] and [`narrow_wide`] bring a result back to `u128` or report
//! overflow.

use crate::domain::Rounding;
use crate::error::AmmError;

#[allow(
    clippy::assign_op_pattern,
    clippy::manual_div_ceil,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic
)]
mod inner {
    uint::construct_uint! {
        /// Unsigned 256-bit integer (four 64-bit limbs).
        pub struct U256(4);
    }

    uint::construct_uint! {
        /// Unsigned 512-bit integer, for products of two fee-scaled balances.
        pub struct U512(8);
    }
}

pub use inner::{U256, U512};

/// Lossless widening of a `u128`.
#[inline]
#[must_use]
pub fn widen(value: u128) -> U256 {
    U256::from(value)
}

/// Narrows to `u128`.
///
/// # Errors
///
/// Returns [`AmmError::ArithmeticOverflow`] with `context` if `value`
/// needs more than 128 bits.
#[inline]
pub fn narrow(value: U256, context: &'static str) -> Result<u128, AmmError> {
    if value.bits() > 128 {
        return Err(AmmError::ArithmeticOverflow(context));
    }
    Ok(value.low_u128())
}

/// Narrows a 512-bit value to `u128`.
///
/// # Errors
///
/// Returns [`AmmError::ArithmeticOverflow`] with `context` if `value`
/// needs more than 128 bits.
#[inline]
pub fn narrow_wide(value: U512, context: &'static str) -> Result<u128, AmmError> {
    if value.bits() > 128 {
        return Err(AmmError::ArithmeticOverflow(context));
    }
    Ok(value.low_u128())
}

/// `a * b / denominator` computed with a 256-bit product.
///
/// # Errors
///
/// - [`AmmError::DivisionByZero`] if `denominator` is zero.
/// - [`AmmError::ArithmeticOverflow`] if the quotient exceeds `u128`.
pub fn mul_div(a: u128, b: u128, denominator: u128, rounding: Rounding) -> Result<u128, AmmError> {
    if denominator == 0 {
        return Err(AmmError::DivisionByZero);
    }
    let product = widen(a) * widen(b);
    let d = widen(denominator);
    let mut quotient = product / d;
    if rounding.is_up() && !(product % d).is_zero() {
        quotient += U256::one();
    }
    narrow(quotient, "mul_div result exceeds u128")
}

/// Floor of the square root of `a * b`.
///
/// The root of a product of two `u128` values always fits in `u128`.
#[must_use]
pub fn sqrt_product(a: u128, b: u128) -> u128 {
    (widen(a) * widen(b)).integer_sqrt().low_u128()
}
