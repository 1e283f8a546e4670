//! Deployment walkthrough.
//!
//! Deploys two mock tokens, a registry and a router, creates the pair and
//! prints the resulting wiring.
//!
//! # Run
//!
//! ```bash
//! RUST_LOG=pairswap=debug cargo run --example deploy
//! ```

use std::sync::Arc;

use pairswap::clock::SystemClock;
use pairswap::config::ExchangeConfig;
use pairswap::domain::{sort_tokens, Address, Amount};
use pairswap::ledger::InMemoryLedger;
use pairswap::router::Router;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pairswap=info")),
        )
        .init();

    println!("=== Deploying pairswap ===\n");

    // ── 1. Mock tokens ──────────────────────────────────────────────────
    let ledger = Arc::new(InMemoryLedger::new());
    let deployer = Address::derive("deployer");
    let token0 = ledger.deploy_token("Token0", "TK0");
    let token1 = ledger.deploy_token("Token1", "TK1");
    for token in [token0, token1] {
        ledger.mint(token, deployer, Amount::new(1_000_000_000_000))?;
    }
    println!("Token0 (TK0): {token0}");
    println!("Token1 (TK1): {token1}");

    // ── 2. Registry and router ──────────────────────────────────────────
    let config = ExchangeConfig::default();
    let router = Router::bootstrap(
        ledger.clone(),
        Arc::new(SystemClock),
        &config,
        Address::derive("router"),
    )?;
    let registry = router.registry();
    println!("\nRouter:      {}", router.address());
    println!("Fee:         {}", config.pair.fee_tier().basis_points());
    println!("Min. liq.:   {}", config.pair.minimum_liquidity());

    // ── 3. Create the pair ──────────────────────────────────────────────
    let pair = registry.create_pair(token0, token1)?;
    println!("\nPair:        {pair}");
    println!("getPair:     {:?}", registry.get_pair(token1, token0));
    println!("All pairs:   {}", registry.all_pairs_length());

    let (first, second) = sort_tokens(token0, token1);
    let label = |t: Address| if t == token0 { "TK0" } else { "TK1" };
    println!("Token order: {} then {}", label(first), label(second));

    // Creating it again is refused.
    if let Err(err) = registry.create_pair(token1, token0) {
        println!("Second createPair: {err}");
    }

    println!("\nEvents:");
    for event in registry.events().snapshot() {
        println!("  {event:?}");
    }

    println!("\n=== Done ===");
    Ok(())
}
