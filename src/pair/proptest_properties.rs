//! Property-based tests using `proptest` for pair invariants.
//!
//! 1. **Product growth**: reserve product never shrinks across swaps.
//! 2. **Share conservation**: balances always sum to the total supply.
//! 3. **Deposit round trip**: mint then burn returns at most the deposit.
//! 4. **Swap round trip**: A to B to A returns at most the original input.
//! 5. **Exact output**: the derived input always buys the requested
//!    output.

use std::sync::Arc;

use proptest::prelude::*;

use super::Pair;
use crate::clock::ManualClock;
use crate::config::PairConfig;
use crate::domain::{Address, Amount, FeeTier, Shares, TokenPair};
use crate::error::AmmError;
use crate::events::EventLog;
use crate::ledger::InMemoryLedger;
use crate::math::{get_amount_in, get_amount_out};
use crate::traits::{Clock, TokenLedger};

const FUNDING: u128 = 1_000_000_000_000_000;

struct Harness {
    ledger: Arc<InMemoryLedger>,
    pair: Pair,
    lp: Address,
    trader: Address,
}

fn harness(reserve_a: u128, reserve_b: u128) -> Harness {
    let ledger = Arc::new(InMemoryLedger::new());
    let x = ledger.deploy_token("Token0", "TK0");
    let y = ledger.deploy_token("Token1", "TK1");
    let Ok(tokens) = TokenPair::new(x, y) else {
        panic!("distinct tokens");
    };
    let lp = Address::derive("lp");
    let trader = Address::derive("trader");
    for holder in [lp, trader] {
        for token in [x, y] {
            let Ok(()) = ledger.mint(token, holder, Amount::new(FUNDING)) else {
                panic!("funding failed");
            };
        }
    }
    let ledger_dyn: Arc<dyn TokenLedger> = ledger.clone();
    let clock: Arc<dyn Clock> = Arc::new(ManualClock::new(0));
    let pair = Pair::new(
        tokens,
        PairConfig::default(),
        ledger_dyn,
        clock,
        EventLog::new(),
    );
    let h = Harness {
        ledger,
        pair,
        lp,
        trader,
    };
    h.send(h.pair.token_a(), h.lp, reserve_a);
    h.send(h.pair.token_b(), h.lp, reserve_b);
    let Ok(_) = h.pair.mint(h.lp, h.lp) else {
        panic!("seed mint failed");
    };
    h
}

impl Harness {
    fn send(&self, token: Address, from: Address, amount: u128) {
        let Ok(()) = self
            .ledger
            .transfer(token, from, self.pair.address(), Amount::new(amount))
        else {
            panic!("transfer to pair failed");
        };
    }

    fn balance(&self, token: Address, holder: Address) -> u128 {
        let Ok(b) = self.ledger.balance_of(token, holder) else {
            panic!("known token");
        };
        b.get()
    }

    fn product(&self) -> u128 {
        let r = self.pair.get_reserves();
        // reserves are bounded by 1e12 in every strategy below
        r.reserve_a.get() * r.reserve_b.get()
    }

    /// Sells `amount_in` of token A for the quoted amount of token B.
    fn sell_a(&self, amount_in: u128) -> Result<u128, AmmError> {
        let r = self.pair.get_reserves();
        let out = get_amount_out(
            Amount::new(amount_in),
            r.reserve_a,
            r.reserve_b,
            FeeTier::STANDARD,
        )?;
        self.send(self.pair.token_a(), self.trader, amount_in);
        self.pair.swap(self.trader, Amount::ZERO, out, self.trader)?;
        Ok(out.get())
    }

    fn sell_b(&self, amount_in: u128) -> Result<u128, AmmError> {
        let r = self.pair.get_reserves();
        let out = get_amount_out(
            Amount::new(amount_in),
            r.reserve_b,
            r.reserve_a,
            FeeTier::STANDARD,
        )?;
        self.send(self.pair.token_b(), self.trader, amount_in);
        self.pair.swap(self.trader, out, Amount::ZERO, self.trader)?;
        Ok(out.get())
    }
}

fn reserve() -> impl Strategy<Value = u128> {
    10_000u128..1_000_000_000_000
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn product_never_shrinks(
        ra in reserve(),
        rb in reserve(),
        trades in prop::collection::vec((any::<bool>(), 1u128..1_000_000_000), 1..8),
    ) {
        let h = harness(ra, rb);
        let mut k = h.product();
        for (a_to_b, amount) in trades {
            let result = if a_to_b { h.sell_a(amount) } else { h.sell_b(amount) };
            // dust that quotes to zero output is rejected; the pool stays put
            if result.is_ok() {
                let next = h.product();
                prop_assert!(next >= k, "product shrank: {} -> {}", k, next);
                k = next;
            } else {
                prop_assert_eq!(h.product(), k);
            }
        }
    }

    #[test]
    fn share_balances_sum_to_total(
        ra in reserve(),
        rb in reserve(),
        moves in prop::collection::vec(1u128..1_000_000, 1..6),
    ) {
        let h = harness(ra, rb);
        let other = Address::derive("other");
        for amount in moves {
            let held = h.pair.share_balance_of(h.lp).get();
            let _ = h.pair.transfer_shares(h.lp, other, Shares::new(amount.min(held)));
            let state = h.pair.snapshot();
            prop_assert_eq!(state.book.sum_of_balances(), Some(state.book.total));
        }
        let back = h.pair.share_balance_of(other);
        let Ok(()) = h.pair.transfer_shares(other, h.pair.address(), back) else {
            panic!("return shares failed");
        };
        if h.pair.burn(other, other).is_ok() {
            let state = h.pair.snapshot();
            prop_assert_eq!(state.book.sum_of_balances(), Some(state.book.total));
        }
    }

    #[test]
    fn deposit_round_trip_returns_at_most_deposit(
        ra in reserve(),
        rb in reserve(),
        da in 1_000u128..1_000_000_000,
        db in 1_000u128..1_000_000_000,
    ) {
        let h = harness(ra, rb);
        let (a, b) = (h.pair.token_a(), h.pair.token_b());
        let before = (h.balance(a, h.trader), h.balance(b, h.trader));
        h.send(a, h.trader, da);
        h.send(b, h.trader, db);
        let Ok(shares) = h.pair.mint(h.trader, h.trader) else {
            // too small to earn a single share
            return Ok(());
        };
        let Ok(()) = h.pair.transfer_shares(h.trader, h.pair.address(), shares) else {
            panic!("share transfer failed");
        };
        let Ok((out_a, out_b)) = h.pair.burn(h.trader, h.trader) else {
            // a lopsided pool can floor one side of a tiny redemption to zero
            return Ok(());
        };
        prop_assert!(out_a.get() <= da);
        prop_assert!(out_b.get() <= db);
        prop_assert!(h.balance(a, h.trader) <= before.0);
        prop_assert!(h.balance(b, h.trader) <= before.1);
    }

    #[test]
    fn swap_round_trip_returns_at_most_input(
        ra in reserve(),
        rb in reserve(),
        amount in 1_000u128..1_000_000_000,
    ) {
        let h = harness(ra, rb);
        let Ok(got_b) = h.sell_a(amount) else {
            return Ok(());
        };
        let Ok(got_a) = h.sell_b(got_b) else {
            return Ok(());
        };
        prop_assert!(got_a <= amount, "round trip profit: {} -> {}", amount, got_a);
    }

    #[test]
    fn exact_output_input_suffices(
        ra in reserve(),
        rb in reserve(),
        want in 1u128..1_000_000,
    ) {
        let h = harness(ra, rb);
        let r = h.pair.get_reserves();
        let Ok(needed) = get_amount_in(
            Amount::new(want),
            r.reserve_a,
            r.reserve_b,
            FeeTier::STANDARD,
        ) else {
            return Ok(());
        };
        let Ok(can_get) = get_amount_out(needed, r.reserve_a, r.reserve_b, FeeTier::STANDARD) else {
            panic!("needed input is non-zero");
        };
        prop_assert!(can_get.get() >= want);

        h.send(h.pair.token_a(), h.trader, needed.get());
        let full = h.pair.swap(h.trader, Amount::ZERO, Amount::new(want), h.trader);
        prop_assert!(full.is_ok());
    }
}
