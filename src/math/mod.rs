//! Arithmetic for exchange calculations.
//!
//! - [`CheckedArithmetic`]: `Result`-returning ops on domain wrappers.
//! - [`div_round`]: `u128` division with explicit rounding.
//! - [`wide`]: 256/512-bit intermediates.
//! - pricing: quotes, exact-in and exact-out amounts, route chaining, the
//!   post-swap product check and price accumulator increments.

mod checked;
mod pricing;
mod rounding;
pub mod wide;

pub use checked::CheckedArithmetic;
pub use pricing::{
    check_invariant, get_amount_in, get_amount_out, get_amounts_in, get_amounts_out,
    price_increment, quote,
};
pub use rounding::div_round;
pub use wide::{mul_div, sqrt_product};
