//! Liquidity and swap walkthrough.
//!
//! Seeds a pair through the router, trades in both directions and along a
//! two-hop route, reads the price oracle, and withdraws.
//!
//! # Run
//!
//! ```bash
//! RUST_LOG=pairswap=debug cargo run --example swap
//! ```

use std::sync::Arc;

use pairswap::clock::ManualClock;
use pairswap::config::ExchangeConfig;
use pairswap::domain::{Address, Amount, Shares, SwapPath, PRICE_FRACTION_BITS};
use pairswap::ledger::InMemoryLedger;
use pairswap::router::{AddLiquidity, RemoveLiquidity, Router};
use pairswap::traits::{Clock, TokenLedger};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pairswap=info")),
        )
        .init();

    println!("=== Constant product swaps (x · y = k) ===\n");

    // ── 1. Wiring ───────────────────────────────────────────────────────
    let ledger = Arc::new(InMemoryLedger::new());
    let clock = Arc::new(ManualClock::new(1_700_000_000));
    let usdc = ledger.deploy_token("USD Coin", "USDC");
    let weth = ledger.deploy_token("Wrapped Ether", "WETH");
    let dai = ledger.deploy_token("Dai", "DAI");
    let router = Router::bootstrap(
        ledger.clone(),
        clock.clone(),
        &ExchangeConfig::default(),
        Address::derive("router"),
    )?;
    let lp = Address::derive("lp");
    let trader = Address::derive("trader");
    for who in [lp, trader] {
        for token in [usdc, weth, dai] {
            ledger.mint(token, who, Amount::new(100_000_000_000))?;
            ledger.approve(token, who, router.address(), Amount::MAX)?;
        }
    }
    let deadline = clock_deadline(&clock, 300);

    // ── 2. Seed USDC/WETH at 2 000 USDC per WETH, and WETH/DAI ──────────
    let seeded = router.add_liquidity(
        lp,
        &AddLiquidity::new(usdc, weth, Amount::new(2_000_000_000), Amount::new(1_000_000), lp, deadline),
    )?;
    println!(
        "Seeded USDC/WETH: {} USDC + {} WETH -> {} shares",
        seeded.amount_a, seeded.amount_b, seeded.shares
    );
    router.add_liquidity(
        lp,
        &AddLiquidity::new(weth, dai, Amount::new(1_000_000), Amount::new(2_000_000_000), lp, deadline),
    )?;
    let registry = router.registry();
    let Some(pair) = registry.pair_for(usdc, weth) else {
        return Err("USDC/WETH pair missing".into());
    };
    let before = pair.price_cumulative();

    // ── 3. Exact-in: sell 10 000 USDC ───────────────────────────────────
    let to_weth = SwapPath::new(vec![usdc, weth])?;
    let quoted = router.get_amounts_out(Amount::new(10_000_000), &to_weth)?;
    let min_out = Amount::new(quoted[1].get() * 995 / 1_000); // 0.5% slippage
    let amounts = router.swap_exact_input(trader, Amount::new(10_000_000), min_out, &to_weth, trader, deadline)?;
    println!("\n--- Sell {} USDC ---", amounts[0]);
    println!("  Received:  {} WETH (min {min_out})", amounts[1]);

    // ── 4. Exact-out: buy 5 000 USDC back ───────────────────────────────
    clock.advance(60);
    let to_usdc = SwapPath::new(vec![weth, usdc])?;
    let amounts = router.swap_exact_output(trader, Amount::new(5_000_000), Amount::new(3_000), &to_usdc, trader, deadline)?;
    println!("\n--- Buy {} USDC ---", amounts[1]);
    println!("  Paid:      {} WETH", amounts[0]);

    // ── 5. Two hops: USDC -> WETH -> DAI ────────────────────────────────
    let route = SwapPath::new(vec![usdc, weth, dai])?;
    let amounts = router.swap_exact_input(trader, Amount::new(1_000_000), Amount::ZERO, &route, trader, deadline)?;
    println!("\n--- Route {route} ---");
    for (hop, amount) in amounts.iter().enumerate() {
        println!("  step {hop}: {amount}");
    }

    // ── 6. Slippage and deadline guards ─────────────────────────────────
    let greedy = router.swap_exact_input(trader, Amount::new(1_000), Amount::new(1_000), &to_weth, trader, deadline);
    println!("\nGreedy minimum:  {greedy:?}");
    let stale = router.swap_exact_input(trader, Amount::new(1_000), Amount::ZERO, &to_weth, trader, 0);
    println!("Stale deadline:  {stale:?}");

    // ── 7. Time-weighted price ──────────────────────────────────────────
    clock.advance(60);
    let after = pair.price_cumulative();
    let usdc_is_first = pair.tokens().is_first(&usdc);
    let average = if usdc_is_first {
        after.average_price_b(&before)
    } else {
        after.average_price_a(&before)
    };
    if let Some(avg) = average {
        let whole = avg >> PRICE_FRACTION_BITS;
        println!("\nTWAP over 120s:  ~{whole} USDC units per WETH unit");
    }

    // ── 8. Withdraw everything the LP holds ─────────────────────────────
    let shares: Shares = pair.share_balance_of(lp);
    pair.approve_shares(lp, router.address(), shares)?;
    let removed = router.remove_liquidity(lp, &RemoveLiquidity::new(usdc, weth, shares, lp, deadline))?;
    println!("\n--- Withdraw {shares} shares ---");
    println!("  USDC:      {}", removed.amount_a);
    println!("  WETH:      {}", removed.amount_b);
    let reserves = pair.get_reserves();
    println!(
        "  Left in pair (locked minimum): {} / {}",
        reserves.reserve_a, reserves.reserve_b
    );

    println!("\nEvents emitted: {}", registry.events().len());
    println!("\n=== Done ===");
    Ok(())
}

fn clock_deadline(clock: &ManualClock, seconds: u64) -> u64 {
    clock.now() + seconds
}
