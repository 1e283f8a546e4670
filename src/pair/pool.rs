//! The constant-product pair.
//!
//! A [`Pair`] owns the reserves of one token couple and issues liquidity
//! shares against them. It never trusts amounts passed in: deposits and
//! swap inputs are measured as the difference between the pair's ledger
//! balances and its recorded reserves.
//!
//! # Swap check
//!
//! After paying out, with balances `b`, inputs `i`, prior reserves `r`,
//! fee scale `D` and fee `f`:
//!
//! ```text
//! (b_a*D - i_a*f) * (b_b*D - i_b*f) >= r_a * r_b * D^2
//! ```
//!
//! # Mint
//!
//! | Situation | Shares issued |
//! |-----------|---------------|
//! | first deposit | `sqrt(a * b) - MINIMUM_LIQUIDITY` (the minimum goes to the lock address) |
//! | later deposit | `min(a * total / r_a, b * total / r_b)` |

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use super::lock::ReentrancyLock;
use super::state::{PairState, PoolState};
use crate::config::PairConfig;
use crate::domain::{
    Address, Amount, PriceCumulative, Reserves, Rounding, Shares, SwapReceipt, TokenPair,
};
use crate::error::AmmError;
use crate::events::{Event, EventLog};
use crate::math::{check_invariant, mul_div, sqrt_product, CheckedArithmetic};
use crate::traits::{Clock, TokenLedger};
use crate::transaction::Transaction;

/// Domain tag hashed into every pair address.
pub const PAIR_ADDRESS_DOMAIN: &[u8] = b"PAIRSWAP_PAIR_V1";

/// Reserve ledger for one canonical token couple.
///
/// Mutating operations (`mint`, `burn`, `swap`, `sync`, `skim`) hold the
/// pair's reentrancy lock for their whole duration and commit pair state
/// in one step at the end. Reads never block and observe committed state.
///
/// Every commit leaves an undo action with the ledger, so reverting any
/// enclosing checkpoint restores the pair along with the balances.
pub struct Pair {
    address: Address,
    tokens: TokenPair,
    config: PairConfig,
    ledger: Arc<dyn TokenLedger>,
    clock: Arc<dyn Clock>,
    events: EventLog,
    pub(super) lock: ReentrancyLock,
    pub(super) state: Arc<RwLock<PairState>>,
}

impl Pair {
    /// The deterministic address of the pair for `tokens`.
    #[must_use]
    pub fn address_for(tokens: &TokenPair) -> Address {
        Address::hash_parts(PAIR_ADDRESS_DOMAIN, &[&tokens.first(), &tokens.second()])
    }

    pub(crate) fn new(
        tokens: TokenPair,
        config: PairConfig,
        ledger: Arc<dyn TokenLedger>,
        clock: Arc<dyn Clock>,
        events: EventLog,
    ) -> Self {
        Self {
            address: Self::address_for(&tokens),
            tokens,
            config,
            ledger,
            clock,
            events,
            lock: ReentrancyLock::default(),
            state: Arc::new(RwLock::new(PairState::default())),
        }
    }

    // -- views ---------------------------------------------------------------

    /// The pair's own address; its tokens are held here on the ledger.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// The canonical couple.
    #[must_use]
    pub const fn tokens(&self) -> TokenPair {
        self.tokens
    }

    /// Canonical first token.
    #[must_use]
    pub const fn token_a(&self) -> Address {
        self.tokens.first()
    }

    /// Canonical second token.
    #[must_use]
    pub const fn token_b(&self) -> Address {
        self.tokens.second()
    }

    /// Reserves as of the last update.
    #[must_use]
    pub fn get_reserves(&self) -> Reserves {
        self.state.read().pool.reserves
    }

    /// Price accumulators projected to the current clock reading.
    ///
    /// Two observations give a time-weighted average price through
    /// [`PriceCumulative::average_price_a`].
    #[must_use]
    pub fn price_cumulative(&self) -> PriceCumulative {
        let pool = self.state.read().pool;
        pool.cumulative_at(self.clock.now())
    }

    /// `true` while a mutating operation is in progress.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.lock.is_locked()
    }

    pub(super) const fn config(&self) -> &PairConfig {
        &self.config
    }

    pub(super) fn events(&self) -> &EventLog {
        &self.events
    }

    pub(crate) fn snapshot(&self) -> PairState {
        self.state.read().clone()
    }

    /// Applies `update` to a copy of the committed state and installs the
    /// copy if it succeeds.
    pub(super) fn update_state<T>(
        &self,
        update: impl FnOnce(&mut PairState) -> Result<T, AmmError>,
    ) -> Result<T, AmmError> {
        let (prior, out) = {
            let mut state = self.state.write();
            let mut next = state.clone();
            let out = update(&mut next)?;
            (std::mem::replace(&mut *state, next), out)
        };
        self.record_undo(prior);
        Ok(out)
    }

    fn record_undo(&self, prior: PairState) {
        let cell = Arc::clone(&self.state);
        let events = self.events.clone();
        let events_len = events.len();
        self.ledger.on_revert(Box::new(move || {
            *cell.write() = prior;
            events.truncate(events_len);
        }));
    }

    // -- mutating operations -------------------------------------------------

    /// Issues shares for tokens transferred to the pair since the last
    /// update.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Reentrancy`] if the pair is locked.
    /// - [`AmmError::Underflow`] if a balance is below its reserve.
    /// - [`AmmError::InsufficientLiquidityMinted`] if no shares would be
    ///   issued, including a first deposit whose root does not exceed the
    ///   minimum liquidity.
    pub fn mint(&self, caller: Address, to: Address) -> Result<Shares, AmmError> {
        let _guard = self.lock.acquire()?;
        let PairState { mut pool, mut book } = self.snapshot();
        let (balance_a, balance_b) = self.balances()?;
        let Reserves {
            reserve_a,
            reserve_b,
            ..
        } = pool.reserves;
        let amount_a = balance_a.safe_sub(&reserve_a)?;
        let amount_b = balance_b.safe_sub(&reserve_b)?;

        let shares = if book.total.is_zero() {
            let root = sqrt_product(amount_a.get(), amount_b.get());
            let minimum = self.config.minimum_liquidity();
            if root <= minimum.get() {
                warn!(pair = %self.address, root, "first deposit below minimum liquidity");
                return Err(AmmError::InsufficientLiquidityMinted);
            }
            book.mint(self.config.lock_address(), minimum)?;
            Shares::new(root - minimum.get())
        } else {
            let total = book.total.get();
            let from_a = mul_div(amount_a.get(), total, reserve_a.get(), Rounding::Down)?;
            let from_b = mul_div(amount_b.get(), total, reserve_b.get(), Rounding::Down)?;
            Shares::new(from_a.min(from_b))
        };
        if shares.is_zero() {
            return Err(AmmError::InsufficientLiquidityMinted);
        }
        book.mint(to, shares)?;
        pool.update(balance_a, balance_b, self.clock.now());

        self.commit(caller, PairState { pool, book });
        self.events.emit(Event::Mint {
            pair: self.address,
            sender: caller,
            amount_a,
            amount_b,
            shares,
            to,
        });
        info!(pair = %self.address, %caller, %to, %amount_a, %amount_b, %shares, "mint");
        Ok(shares)
    }

    /// Redeems the shares held at the pair's own address and pays both
    /// tokens to `to`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Reentrancy`] if the pair is locked.
    /// - [`AmmError::InsufficientLiquidityBurned`] if either payout would
    ///   be zero.
    /// - [`AmmError::Ledger`] if a payout transfer fails.
    pub fn burn(&self, caller: Address, to: Address) -> Result<(Amount, Amount), AmmError> {
        let _guard = self.lock.acquire()?;
        let PairState { mut pool, mut book } = self.snapshot();
        let shares = book.balance(&self.address);
        if shares.is_zero() {
            return Err(AmmError::InsufficientLiquidityBurned);
        }
        let total = book.total.get();
        let amount_a = Amount::new(mul_div(
            shares.get(),
            pool.reserves.reserve_a.get(),
            total,
            Rounding::Down,
        )?);
        let amount_b = Amount::new(mul_div(
            shares.get(),
            pool.reserves.reserve_b.get(),
            total,
            Rounding::Down,
        )?);
        if amount_a.is_zero() || amount_b.is_zero() {
            return Err(AmmError::InsufficientLiquidityBurned);
        }
        book.burn(self.address, shares)?;

        let txn = Transaction::begin(self.ledger.as_ref(), &self.events);
        self.ledger
            .transfer(self.tokens.first(), self.address, to, amount_a)?;
        self.ledger
            .transfer(self.tokens.second(), self.address, to, amount_b)?;
        let (balance_a, balance_b) = self.balances()?;
        pool.update(balance_a, balance_b, self.clock.now());

        self.commit(caller, PairState { pool, book });
        self.events.emit(Event::Burn {
            pair: self.address,
            sender: caller,
            amount_a,
            amount_b,
            shares,
            to,
        });
        txn.commit();
        info!(pair = %self.address, %caller, %to, %amount_a, %amount_b, %shares, "burn");
        Ok((amount_a, amount_b))
    }

    /// Pays out the requested amounts, then verifies the fee-adjusted
    /// product against what arrived.
    ///
    /// Inputs must already be on the pair's balance or arrive during the
    /// output transfers.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientOutputAmount`] if both outputs are zero.
    /// - [`AmmError::Reentrancy`] if the pair is locked.
    /// - [`AmmError::InsufficientLiquidity`] if an output reaches its
    ///   reserve.
    /// - [`AmmError::InvalidRecipient`] if `to` is one of the pair's tokens.
    /// - [`AmmError::InsufficientInputAmount`] if nothing came in.
    /// - [`AmmError::InvariantViolation`] if the product shrank.
    pub fn swap(
        &self,
        caller: Address,
        amount_out_a: Amount,
        amount_out_b: Amount,
        to: Address,
    ) -> Result<SwapReceipt, AmmError> {
        if amount_out_a.is_zero() && amount_out_b.is_zero() {
            return Err(AmmError::InsufficientOutputAmount);
        }
        let _guard = self.lock.acquire()?;
        let mut pool = self.state.read().pool;
        let reserves = pool.reserves;
        if amount_out_a >= reserves.reserve_a || amount_out_b >= reserves.reserve_b {
            return Err(AmmError::InsufficientLiquidity);
        }
        if self.tokens.contains(&to) {
            return Err(AmmError::InvalidRecipient);
        }

        let txn = Transaction::begin(self.ledger.as_ref(), &self.events);
        if !amount_out_a.is_zero() {
            self.ledger
                .transfer(self.tokens.first(), self.address, to, amount_out_a)?;
        }
        if !amount_out_b.is_zero() {
            self.ledger
                .transfer(self.tokens.second(), self.address, to, amount_out_b)?;
        }
        let (balance_a, balance_b) = self.balances()?;
        // reserves exceed outputs, checked above
        let kept_a = reserves.reserve_a.safe_sub(&amount_out_a)?;
        let kept_b = reserves.reserve_b.safe_sub(&amount_out_b)?;
        let amount_in_a = balance_a.saturating_sub(&kept_a);
        let amount_in_b = balance_b.saturating_sub(&kept_b);
        if amount_in_a.is_zero() && amount_in_b.is_zero() {
            return Err(AmmError::InsufficientInputAmount);
        }
        if let Err(err) = check_invariant(
            (balance_a, balance_b),
            (amount_in_a, amount_in_b),
            &reserves,
            self.config.fee_tier(),
        ) {
            warn!(pair = %self.address, %caller, %amount_in_a, %amount_in_b, %amount_out_a, %amount_out_b, "swap rejected: {err}");
            return Err(err);
        }
        pool.update(balance_a, balance_b, self.clock.now());

        self.commit_pool(caller, pool);
        self.events.emit(Event::Swap {
            pair: self.address,
            sender: caller,
            amount_in_a,
            amount_in_b,
            amount_out_a,
            amount_out_b,
            to,
        });
        txn.commit();
        debug!(pair = %self.address, %caller, %to, %amount_in_a, %amount_in_b, %amount_out_a, %amount_out_b, "swap");
        Ok(SwapReceipt::new(
            amount_in_a,
            amount_in_b,
            amount_out_a,
            amount_out_b,
        ))
    }

    /// Forces reserves to match the pair's balances.
    ///
    /// # Errors
    ///
    /// [`AmmError::Reentrancy`] if the pair is locked, or a ledger failure.
    pub fn sync(&self, caller: Address) -> Result<Reserves, AmmError> {
        let _guard = self.lock.acquire()?;
        let mut pool = self.state.read().pool;
        let (balance_a, balance_b) = self.balances()?;
        pool.update(balance_a, balance_b, self.clock.now());
        self.commit_pool(caller, pool);
        debug!(pair = %self.address, %caller, "sync requested");
        Ok(pool.reserves)
    }

    /// Sends any balance in excess of the reserves to `to`.
    ///
    /// # Errors
    ///
    /// [`AmmError::Reentrancy`] if the pair is locked, or a ledger failure.
    pub fn skim(&self, caller: Address, to: Address) -> Result<(Amount, Amount), AmmError> {
        let _guard = self.lock.acquire()?;
        let reserves = self.state.read().pool.reserves;
        let (balance_a, balance_b) = self.balances()?;
        let excess_a = balance_a.saturating_sub(&reserves.reserve_a);
        let excess_b = balance_b.saturating_sub(&reserves.reserve_b);

        let txn = Transaction::begin(self.ledger.as_ref(), &self.events);
        if !excess_a.is_zero() {
            self.ledger
                .transfer(self.tokens.first(), self.address, to, excess_a)?;
        }
        if !excess_b.is_zero() {
            self.ledger
                .transfer(self.tokens.second(), self.address, to, excess_b)?;
        }
        self.events.emit(Event::Skim {
            pair: self.address,
            sender: caller,
            amount_a: excess_a,
            amount_b: excess_b,
            to,
        });
        txn.commit();
        debug!(pair = %self.address, %caller, %to, %excess_a, %excess_b, "skim");
        Ok((excess_a, excess_b))
    }

    // -- helpers -------------------------------------------------------------

    fn balances(&self) -> Result<(Amount, Amount), AmmError> {
        let a = self.ledger.balance_of(self.tokens.first(), self.address)?;
        let b = self.ledger.balance_of(self.tokens.second(), self.address)?;
        Ok((a, b))
    }

    fn commit(&self, caller: Address, next: PairState) {
        let reserves = next.pool.reserves;
        let prior = std::mem::replace(&mut *self.state.write(), next);
        self.record_undo(prior);
        self.emit_sync(caller, reserves);
    }

    fn commit_pool(&self, caller: Address, pool: PoolState) {
        let prior = {
            let mut state = self.state.write();
            let prior = state.clone();
            state.pool = pool;
            prior
        };
        self.record_undo(prior);
        self.emit_sync(caller, pool.reserves);
    }

    fn emit_sync(&self, caller: Address, reserves: Reserves) {
        self.events.emit(Event::Sync {
            pair: self.address,
            sender: caller,
            reserve_a: reserves.reserve_a,
            reserve_b: reserves.reserve_b,
        });
    }
}

impl std::fmt::Debug for Pair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pair")
            .field("address", &self.address)
            .field("tokens", &self.tokens)
            .field("reserves", &self.get_reserves())
            .field("locked", &self.is_locked())
            .finish()
    }
}
