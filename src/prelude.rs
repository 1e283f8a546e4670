//! Convenience re-exports for common types and traits.
//!
//! The prelude provides a single import to bring all commonly used items
//! into scope:
//!
//! ```rust
//! use pairswap::prelude::*;
//! ```

pub use crate::clock::{ManualClock, SystemClock};
pub use crate::config::{ExchangeConfig, PairConfig, RouterConfig, MINIMUM_LIQUIDITY};
pub use crate::domain::{
    Address, Amount, FeeTier, LiquidityAdded, LiquidityRemoved, PriceCumulative, Reserves,
    Shares, SwapPath, SwapReceipt, TokenPair,
};
pub use crate::error::{AmmError, LedgerError, Result};
pub use crate::events::{Event, EventLog};
pub use crate::ledger::InMemoryLedger;
pub use crate::pair::Pair;
pub use crate::registry::Registry;
pub use crate::router::{AddLiquidity, RemoveLiquidity, Router};
pub use crate::traits::{Clock, TokenLedger};
