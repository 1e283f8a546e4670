//! Token ledger implementations.
//!
//! [`InMemoryLedger`] stands in for deployed token contracts in tests,
//! demos and simulations.

mod in_memory;

pub use in_memory::{InMemoryLedger, Transfer, TransferHook};
