//! Rounding helper for `u128` division.
//!
//! [`div_round`] is the building block behind
//! [`Amount::checked_div`](crate::domain::Amount::checked_div) and the
//! share division in [`CheckedArithmetic`](super::CheckedArithmetic).
//!
//! # Convention
//!
//! Round against the trader:
//!
//! | Quantity | Direction |
//! |----------|-----------|
//! | Swap output, shares minted, tokens redeemed | [`Rounding::Down`] |
//! | Required swap input | [`Rounding::Up`] |
//!
//! ```
//! use pairswap::domain::Rounding;
//! use pairswap::math::div_round;
//!
//! assert_eq!(div_round(10, 3, Rounding::Down), Some(3));
//! assert_eq!(div_round(10, 3, Rounding::Up), Some(4));
//! assert_eq!(div_round(10, 0, Rounding::Down), None);
//! ```

use crate::domain::Rounding;

/// Integer division with explicit rounding. `None` if `denominator` is zero.
#[must_use]
pub const fn div_round(numerator: u128, denominator: u128, rounding: Rounding) -> Option<u128> {
    if denominator == 0 {
        return None;
    }
    let q = numerator / denominator;
    match rounding {
        Rounding::Down => Some(q),
        // q + 1 cannot overflow: a remainder implies denominator > 1
        Rounding::Up if numerator % denominator != 0 => Some(q + 1),
        Rounding::Up => Some(q),
    }
}
