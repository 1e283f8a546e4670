//! Collaborator abstractions.
//!
//! The exchange consumes two external services through these traits:
//! [`TokenLedger`] for balances and transfers, and [`Clock`] for time.
//! Both are used as `Arc<dyn Trait>` so one ledger and one clock can be
//! shared by the registry, every pair and the router.

mod clock;
mod token_ledger;

pub use clock::Clock;
pub use token_ledger::{Checkpoint, RevertAction, TokenLedger};
