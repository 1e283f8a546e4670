//! Exchange configuration structs.
//!
//! [`ExchangeConfig`] bundles the [`PairConfig`] applied to every pair with
//! the [`RouterConfig`] path policy. Each struct validates on construction
//! and exposes `validate()` for values built by deserialization.

mod exchange;
mod pair;
mod router;

pub use exchange::ExchangeConfig;
pub use pair::{PairConfig, MINIMUM_LIQUIDITY};
pub use router::{RouterConfig, DEFAULT_MAX_HOPS};
