//! # pairswap
//!
//! Constant-product exchange core: a registry of token pairs, per-pair
//! reserve ledgers with liquidity shares, and a router that adds and
//! removes liquidity and swaps along multi-hop paths.
//!
//! Tokens live on an external [`TokenLedger`](traits::TokenLedger). Pairs
//! hold their tokens at their own [`Address`](domain::Address) and measure
//! deposits and swap inputs as the difference between ledger balances and
//! recorded reserves. [`InMemoryLedger`](ledger::InMemoryLedger) is a
//! journaled implementation for tests, demos and simulations.
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `serde` | no | `Serialize`/`Deserialize` for domain types, configs and events |
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use pairswap::clock::ManualClock;
//! use pairswap::config::ExchangeConfig;
//! use pairswap::domain::{Address, Amount, SwapPath};
//! use pairswap::ledger::InMemoryLedger;
//! use pairswap::router::{AddLiquidity, Router};
//! use pairswap::traits::TokenLedger;
//!
//! // 1. A ledger with two tokens and a funded account
//! let ledger = Arc::new(InMemoryLedger::new());
//! let tk0 = ledger.deploy_token("Token0", "TK0");
//! let tk1 = ledger.deploy_token("Token1", "TK1");
//! let alice = Address::derive("alice");
//! ledger.mint(tk0, alice, Amount::new(10_000)).expect("known token");
//! ledger.mint(tk1, alice, Amount::new(10_000)).expect("known token");
//!
//! // 2. Registry and router
//! let clock = Arc::new(ManualClock::new(0));
//! let router = Router::bootstrap(ledger.clone(), clock, &ExchangeConfig::default(), Address::derive("router"))
//!     .expect("valid config");
//! ledger.approve(tk0, alice, router.address(), Amount::MAX).expect("known token");
//! ledger.approve(tk1, alice, router.address(), Amount::MAX).expect("known token");
//!
//! // 3. Seed the pair and swap 100 TK0 for TK1
//! let seed = AddLiquidity::new(tk0, tk1, Amount::new(2_000), Amount::new(2_000), alice, 10);
//! router.add_liquidity(alice, &seed).expect("deposit");
//! let path = SwapPath::new(vec![tk0, tk1]).expect("two tokens");
//! let amounts = router
//!     .swap_exact_input(alice, Amount::new(100), Amount::new(1), &path, alice, 10)
//!     .expect("swap");
//! assert_eq!(amounts, vec![Amount::new(100), Amount::new(94)]);
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   Router     │  deadline + slippage guards, multi-hop routing
//! └──────┬──────┘
//!        │ transfer_from / mint / burn / swap
//!        ▼
//! ┌─────────────┐
//! │  Registry    │  canonical couple -> Pair, creation order
//! └──────┬──────┘
//!        │ Arc<Pair>
//!        ▼
//! ┌─────────────┐
//! │    Pair      │  reserves, share token, product check, accumulators
//! └──────┬──────┘
//!        │ TokenLedger + Clock traits
//!        ▼
//! ┌─────────────┐
//! │   Ledger     │  balances, allowances, checkpoints
//! └─────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Value types: [`Address`](domain::Address), [`Amount`](domain::Amount), [`Shares`](domain::Shares), [`SwapPath`](domain::SwapPath), etc. |
//! | [`traits`] | Collaborator seams: [`TokenLedger`](traits::TokenLedger), [`Clock`](traits::Clock) |
//! | [`config`] | [`PairConfig`](config::PairConfig), [`RouterConfig`](config::RouterConfig), [`ExchangeConfig`](config::ExchangeConfig) |
//! | [`registry`] | [`Registry`](registry::Registry): pair creation and lookup |
//! | [`pair`]   | [`Pair`](pair::Pair): mint, burn, swap, sync, skim, share token |
//! | [`router`] | [`Router`](router::Router) and its request types |
//! | [`ledger`] | [`InMemoryLedger`](ledger::InMemoryLedger) |
//! | [`clock`]  | [`SystemClock`](clock::SystemClock), [`ManualClock`](clock::ManualClock) |
//! | [`events`] | [`Event`](events::Event) and the shared [`EventLog`](events::EventLog) |
//! | [`math`]   | Checked and wide arithmetic, pricing formulas |
//! | [`error`]  | [`AmmError`](error::AmmError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types and traits |

pub mod clock;
pub mod config;
pub mod domain;
pub mod error;
pub mod events;
pub mod ledger;
pub mod math;
pub mod pair;
pub mod prelude;
pub mod registry;
pub mod router;
pub mod traits;

mod transaction;
