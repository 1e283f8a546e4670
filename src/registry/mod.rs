//! Pair creation and lookup.
//!
//! The [`Registry`] is the single owner of every [`Pair`](crate::pair::Pair).
//! It canonicalizes token couples, derives deterministic pair addresses,
//! and keeps an ordered list of all pairs ever created.
//!
//! # Usage
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use pairswap::clock::ManualClock;
//! use pairswap::config::PairConfig;
//! use pairswap::ledger::InMemoryLedger;
//! use pairswap::registry::Registry;
//!
//! let ledger = Arc::new(InMemoryLedger::new());
//! let usdc = ledger.deploy_token("USD Coin", "USDC");
//! let weth = ledger.deploy_token("Wrapped Ether", "WETH");
//!
//! let registry = Registry::new(ledger, Arc::new(ManualClock::new(0)), PairConfig::default())
//!     .expect("valid config");
//! let pair = registry.create_pair(weth, usdc).expect("new couple");
//!
//! assert_eq!(registry.get_pair(usdc, weth), Some(pair));
//! assert_eq!(registry.all_pairs_length(), 1);
//! ```

mod pair_registry;

pub use pair_registry::Registry;
