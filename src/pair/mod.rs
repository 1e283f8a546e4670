//! Per-couple reserve ledger.
//!
//! - [`Pair`]: reserves, the swap check, share issuance and
//!   redemption, price accumulators.
//! - The share token lives on [`Pair`] as well (`transfer_shares`,
//!   `approve_shares`, ...).
//! - A non-blocking reentrancy lock guards every mutating operation.

mod lock;
mod pool;
mod shares;
mod state;

#[cfg(test)]
mod proptest_properties;

pub use pool::{Pair, PAIR_ADDRESS_DOMAIN};
pub(crate) use state::PairState;
