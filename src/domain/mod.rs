//! Fundamental domain value types used throughout the exchange.
//!
//! This module contains the value types that model a constant-product
//! market: addresses, amounts, shares, fee fractions, token couples, swap
//! routes, reserve snapshots and operation receipts. Types with invariants
//! use validated constructors.

mod address;
mod amount;
mod basis_points;
mod fee_tier;
mod receipts;
mod reserves;
mod rounding;
mod shares;
mod swap_path;
mod token_pair;

pub use address::Address;
pub use amount::Amount;
pub use basis_points::{BasisPoints, BPS_DENOMINATOR};
pub use fee_tier::FeeTier;
pub use receipts::{LiquidityAdded, LiquidityRemoved, SwapReceipt};
pub use reserves::{PriceCumulative, Reserves, PRICE_FRACTION_BITS};
pub use rounding::Rounding;
pub use shares::Shares;
pub use swap_path::SwapPath;
pub use token_pair::{sort_tokens, TokenPair};
