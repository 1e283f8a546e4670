//! Constant-product pricing with a basis-point fee.
//!
//! Pure functions over reserves. With reserves `(r_in, r_out)`, fee scale
//! `D = 10 000` and retained fraction `R = D - fee`:
//!
//! ```text
//! amount_out = in * R * r_out / (r_in * D + in * R)            floored
//! amount_in  = r_in * out * D / ((r_out - out) * R) + 1
//! ```
//!
//! Products are formed in 256 or 512 bits; results narrow back to
//! `u128` or fail with [`AmmError::ArithmeticOverflow`].

use super::wide::{mul_div, narrow_wide, widen, U256, U512};
use crate::domain::{Amount, FeeTier, Reserves, Rounding, PRICE_FRACTION_BITS};
use crate::error::AmmError;

/// Amount of the second token equivalent to `amount_a` at the current
/// reserve ratio, with no fee.
///
/// # Errors
///
/// - [`AmmError::InsufficientAmount`] if `amount_a` is zero.
/// - [`AmmError::InsufficientLiquidity`] if either reserve is zero.
///
/// ```
/// use pairswap::domain::Amount;
/// use pairswap::math::quote;
///
/// let b = quote(Amount::new(50), Amount::new(1_000), Amount::new(2_000)).expect("reserves set");
/// assert_eq!(b, Amount::new(100));
/// ```
pub fn quote(amount_a: Amount, reserve_a: Amount, reserve_b: Amount) -> Result<Amount, AmmError> {
    if amount_a.is_zero() {
        return Err(AmmError::InsufficientAmount("quote amount is zero"));
    }
    if reserve_a.is_zero() || reserve_b.is_zero() {
        return Err(AmmError::InsufficientLiquidity);
    }
    mul_div(amount_a.get(), reserve_b.get(), reserve_a.get(), Rounding::Down).map(Amount::new)
}

/// Output paid for an exact `amount_in`, floored.
///
/// # Errors
///
/// - [`AmmError::InsufficientInputAmount`] if `amount_in` is zero.
/// - [`AmmError::InsufficientLiquidity`] if either reserve is zero.
pub fn get_amount_out(
    amount_in: Amount,
    reserve_in: Amount,
    reserve_out: Amount,
    fee: FeeTier,
) -> Result<Amount, AmmError> {
    if amount_in.is_zero() {
        return Err(AmmError::InsufficientInputAmount);
    }
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(AmmError::InsufficientLiquidity);
    }
    let in_with_fee = U512::from(amount_in.get()) * U512::from(fee.retained());
    let numerator = in_with_fee * U512::from(reserve_out.get());
    let denominator = U512::from(reserve_in.get()) * U512::from(fee.denominator()) + in_with_fee;
    narrow_wide(numerator / denominator, "amount out exceeds u128").map(Amount::new)
}

/// Input required to receive exactly `amount_out`, rounded against the
/// trader.
///
/// # Errors
///
/// - [`AmmError::InsufficientOutputAmount`] if `amount_out` is zero.
/// - [`AmmError::InsufficientLiquidity`] if either reserve is zero or
///   `amount_out` would drain the output reserve.
pub fn get_amount_in(
    amount_out: Amount,
    reserve_in: Amount,
    reserve_out: Amount,
    fee: FeeTier,
) -> Result<Amount, AmmError> {
    if amount_out.is_zero() {
        return Err(AmmError::InsufficientOutputAmount);
    }
    if reserve_in.is_zero() || reserve_out.is_zero() || amount_out >= reserve_out {
        return Err(AmmError::InsufficientLiquidity);
    }
    let numerator =
        U512::from(reserve_in.get()) * U512::from(amount_out.get()) * U512::from(fee.denominator());
    let remaining = reserve_out.get() - amount_out.get();
    let denominator = U512::from(remaining) * U512::from(fee.retained());
    if denominator.is_zero() {
        return Err(AmmError::DivisionByZero);
    }
    let quotient = numerator / denominator + U512::one();
    narrow_wide(quotient, "amount in exceeds u128").map(Amount::new)
}

/// Chains [`get_amount_out`] across hops.
///
/// `hops[i]` is `(reserve_in, reserve_out)` of the i-th pair. The result
/// has `hops.len() + 1` entries and starts with `amount_in`.
///
/// # Errors
///
/// Propagates the first failing hop.
pub fn get_amounts_out(
    amount_in: Amount,
    hops: &[(Amount, Amount)],
    fee: FeeTier,
) -> Result<Vec<Amount>, AmmError> {
    let mut amounts = Vec::with_capacity(hops.len() + 1);
    amounts.push(amount_in);
    let mut current = amount_in;
    for &(reserve_in, reserve_out) in hops {
        current = get_amount_out(current, reserve_in, reserve_out, fee)?;
        amounts.push(current);
    }
    Ok(amounts)
}

/// Chains [`get_amount_in`] backwards across hops.
///
/// `hops` is ordered as in [`get_amounts_out`]. The result has
/// `hops.len() + 1` entries, ends with `amount_out`, and its first entry
/// is the input the route requires.
///
/// # Errors
///
/// Propagates the first failing hop, walking from the last.
pub fn get_amounts_in(
    amount_out: Amount,
    hops: &[(Amount, Amount)],
    fee: FeeTier,
) -> Result<Vec<Amount>, AmmError> {
    let mut amounts = vec![Amount::ZERO; hops.len() + 1];
    amounts[hops.len()] = amount_out;
    for (i, &(reserve_in, reserve_out)) in hops.iter().enumerate().rev() {
        amounts[i] = get_amount_in(amounts[i + 1], reserve_in, reserve_out, fee)?;
    }
    Ok(amounts)
}

/// Post-swap check of the fee-adjusted constant product.
///
/// Verifies `(bal_a*D - in_a*fee) * (bal_b*D - in_b*fee) >= r_a * r_b * D^2`.
///
/// # Errors
///
/// - [`AmmError::Underflow`] if an input exceeds its balance.
/// - [`AmmError::InvariantViolation`] if the product shrank.
pub fn check_invariant(
    balances: (Amount, Amount),
    inputs: (Amount, Amount),
    reserves: &Reserves,
    fee: FeeTier,
) -> Result<(), AmmError> {
    let d = U512::from(fee.denominator());
    let f = U512::from(fee.charged());
    let adjusted = |balance: Amount, input: Amount| {
        (U512::from(balance.get()) * d)
            .checked_sub(U512::from(input.get()) * f)
            .ok_or(AmmError::Underflow("swap input exceeds balance"))
    };
    let adjusted_a = adjusted(balances.0, inputs.0)?;
    let adjusted_b = adjusted(balances.1, inputs.1)?;
    let k_before =
        U512::from(reserves.reserve_a.get()) * U512::from(reserves.reserve_b.get()) * d * d;
    if adjusted_a * adjusted_b < k_before {
        return Err(AmmError::InvariantViolation);
    }
    Ok(())
}

/// Increment of a price accumulator over `elapsed` seconds.
///
/// The price `reserve_other / reserve_self` is encoded as UQ64.64 and
/// multiplied by `elapsed`; the result is reduced modulo 2^128 to match
/// the wrapping accumulators. Zero when `reserve_self` is empty.
#[must_use]
pub fn price_increment(reserve_self: Amount, reserve_other: Amount, elapsed: u64) -> u128 {
    if reserve_self.is_zero() || elapsed == 0 {
        return 0;
    }
    let scaled_other = widen(reserve_other.get()) << PRICE_FRACTION_BITS as usize;
    let price = scaled_other / widen(reserve_self.get());
    let (scaled, _) = price.overflowing_mul(U256::from(elapsed));
    scaled.low_u128()
}
