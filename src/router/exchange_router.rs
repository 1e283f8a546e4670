//! The router.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::{AddLiquidity, RemoveLiquidity};
use crate::config::{ExchangeConfig, RouterConfig};
use crate::domain::{
    Address, Amount, FeeTier, LiquidityAdded, LiquidityRemoved, SwapPath, TokenPair,
};
use crate::error::AmmError;
use crate::math;
use crate::pair::Pair;
use crate::registry::Registry;
use crate::traits::{Clock, TokenLedger};
use crate::transaction::Transaction;

/// Stateless entry point over a shared [`Registry`].
///
/// Callers approve the router's [`address`](Self::address) on the ledger
/// (and on a pair's share token before withdrawing). Every operation
/// checks its deadline once, at entry, and then either completes or
/// leaves no trace.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
///
/// use pairswap::clock::ManualClock;
/// use pairswap::config::ExchangeConfig;
/// use pairswap::domain::{Address, Amount, SwapPath};
/// use pairswap::ledger::InMemoryLedger;
/// use pairswap::router::{AddLiquidity, Router};
/// use pairswap::traits::TokenLedger;
///
/// let ledger = Arc::new(InMemoryLedger::new());
/// let clock = Arc::new(ManualClock::new(100));
/// let usdc = ledger.deploy_token("USD Coin", "USDC");
/// let weth = ledger.deploy_token("Wrapped Ether", "WETH");
/// let alice = Address::derive("alice");
/// ledger.mint(usdc, alice, Amount::new(1_000_000)).expect("known token");
/// ledger.mint(weth, alice, Amount::new(1_000_000)).expect("known token");
///
/// let router = Router::bootstrap(
///     ledger.clone(),
///     clock,
///     &ExchangeConfig::default(),
///     Address::derive("router"),
/// )
/// .expect("valid config");
/// for token in [usdc, weth] {
///     ledger.approve(token, alice, router.address(), Amount::MAX).expect("known token");
/// }
///
/// let req = AddLiquidity::new(usdc, weth, Amount::new(100_000), Amount::new(100_000), alice, 200);
/// router.add_liquidity(alice, &req).expect("deposit");
///
/// let path = SwapPath::new(vec![usdc, weth]).expect("two tokens");
/// let amounts = router
///     .swap_exact_input(alice, Amount::new(1_000), Amount::new(980), &path, alice, 200)
///     .expect("swap");
/// assert_eq!(amounts[0], Amount::new(1_000));
/// assert!(amounts[1] >= Amount::new(980));
/// ```
pub struct Router {
    registry: Arc<Registry>,
    address: Address,
    config: RouterConfig,
}

impl Router {
    /// Creates a router over `registry`, acting as `address` on the ledger.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ZeroAddress`] if `address` is zero.
    /// - [`AmmError::InvalidConfiguration`] if `config` is invalid.
    pub fn new(
        registry: Arc<Registry>,
        address: Address,
        config: RouterConfig,
    ) -> Result<Self, AmmError> {
        if address.is_zero() {
            return Err(AmmError::ZeroAddress);
        }
        config.validate()?;
        Ok(Self {
            registry,
            address,
            config,
        })
    }

    /// Builds a fresh registry from `config` and a router over it.
    ///
    /// # Errors
    ///
    /// As [`Router::new`] and [`Registry::new`].
    pub fn bootstrap(
        ledger: Arc<dyn TokenLedger>,
        clock: Arc<dyn Clock>,
        config: &ExchangeConfig,
        address: Address,
    ) -> Result<Self, AmmError> {
        config.validate()?;
        let registry = Arc::new(Registry::new(ledger, clock, config.pair)?);
        Self::new(registry, address, config.router)
    }

    /// The router's ledger identity.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// The registry this router trades against.
    #[must_use]
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Path policy.
    #[must_use]
    pub const fn config(&self) -> &RouterConfig {
        &self.config
    }

    // -- liquidity -----------------------------------------------------------

    /// Deposits both tokens at the pair's current ratio and mints shares
    /// to `req.to`, creating the pair first if needed.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Expired`] past the deadline.
    /// - [`AmmError::IdenticalTokens`] / [`AmmError::ZeroAddress`] for a
    ///   malformed couple.
    /// - [`AmmError::InsufficientAmount`] if the deposit would fall below
    ///   either minimum.
    /// - Any ledger or pair failure, after which nothing has changed.
    pub fn add_liquidity(
        &self,
        caller: Address,
        req: &AddLiquidity,
    ) -> Result<LiquidityAdded, AmmError> {
        self.ensure(req.deadline)?;
        TokenPair::new(req.token_a, req.token_b)?;
        let txn = Transaction::begin(self.ledger(), self.registry.events())
            .with_registry(&self.registry);
        let pair = match self.registry.pair_for(req.token_a, req.token_b) {
            Some(pair) => pair,
            None => {
                let address = self.registry.create_pair(req.token_a, req.token_b)?;
                self.registry.pair(address).ok_or(AmmError::PairNotFound)?
            }
        };

        let (reserve_a, reserve_b) = pair
            .get_reserves()
            .oriented(pair.tokens().is_first(&req.token_a));
        let (amount_a, amount_b) = optimal_deposit(req, reserve_a, reserve_b)?;

        self.ledger()
            .transfer_from(req.token_a, self.address, caller, pair.address(), amount_a)?;
        self.ledger()
            .transfer_from(req.token_b, self.address, caller, pair.address(), amount_b)?;
        let shares = pair.mint(self.address, req.to)?;

        txn.commit();
        info!(pair = %pair.address(), %caller, to = %req.to, %amount_a, %amount_b, %shares, "liquidity added");
        Ok(LiquidityAdded {
            amount_a,
            amount_b,
            shares,
        })
    }

    /// Pulls `req.shares` from `caller` into the pair, burns them and pays
    /// both tokens to `req.to`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Expired`] past the deadline.
    /// - [`AmmError::PairNotFound`] if the couple has no pair.
    /// - [`AmmError::Underflow`] if `caller` holds fewer shares, before any
    ///   token moves.
    /// - [`AmmError::InsufficientAllowance`] if the router is not approved.
    /// - [`AmmError::InsufficientAmount`] if a payout is below its minimum.
    pub fn remove_liquidity(
        &self,
        caller: Address,
        req: &RemoveLiquidity,
    ) -> Result<LiquidityRemoved, AmmError> {
        self.ensure(req.deadline)?;
        let pair = self
            .registry
            .pair_for(req.token_a, req.token_b)
            .ok_or(AmmError::PairNotFound)?;
        let txn = Transaction::begin(self.ledger(), self.registry.events());

        pair.transfer_shares_from(self.address, caller, pair.address(), req.shares)?;
        let (first, second) = pair.burn(self.address, req.to)?;
        let (amount_a, amount_b) = if pair.tokens().is_first(&req.token_a) {
            (first, second)
        } else {
            (second, first)
        };
        if amount_a < req.amount_a_min {
            warn!(pair = %pair.address(), %amount_a, min = %req.amount_a_min, "withdrawal below minimum");
            return Err(AmmError::InsufficientAmount("token a payout below minimum"));
        }
        if amount_b < req.amount_b_min {
            warn!(pair = %pair.address(), %amount_b, min = %req.amount_b_min, "withdrawal below minimum");
            return Err(AmmError::InsufficientAmount("token b payout below minimum"));
        }

        txn.commit();
        info!(pair = %pair.address(), %caller, to = %req.to, shares = %req.shares, %amount_a, %amount_b, "liquidity removed");
        Ok(LiquidityRemoved { amount_a, amount_b })
    }

    // -- swaps ---------------------------------------------------------------

    /// Sells exactly `amount_in` of the path's first token.
    ///
    /// Returns the amount entering each hop followed by the final output.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Expired`] past the deadline.
    /// - [`AmmError::InvalidPath`] if the path breaks the router policy.
    /// - [`AmmError::PairNotFound`] if a hop has no pair.
    /// - [`AmmError::InsufficientOutputAmount`] if the final output is
    ///   below `amount_out_min`.
    pub fn swap_exact_input(
        &self,
        caller: Address,
        amount_in: Amount,
        amount_out_min: Amount,
        path: &SwapPath,
        to: Address,
        deadline: u64,
    ) -> Result<Vec<Amount>, AmmError> {
        self.ensure(deadline)?;
        self.config.check_path(path)?;
        let pairs = self.resolve(path)?;
        let amounts = math::get_amounts_out(amount_in, &oriented_reserves(path, &pairs), self.fee())?;
        let out = amounts.last().copied().unwrap_or(Amount::ZERO);
        if out < amount_out_min {
            warn!(%path, %amount_in, %out, min = %amount_out_min, "swap output below minimum");
            return Err(AmmError::InsufficientOutputAmount);
        }
        self.execute(caller, path, &pairs, &amounts, to)?;
        Ok(amounts)
    }

    /// Buys exactly `amount_out` of the path's last token.
    ///
    /// # Errors
    ///
    /// As [`swap_exact_input`](Self::swap_exact_input), with
    /// [`AmmError::ExcessiveInputAmount`] when the required input exceeds
    /// `amount_in_max`.
    pub fn swap_exact_output(
        &self,
        caller: Address,
        amount_out: Amount,
        amount_in_max: Amount,
        path: &SwapPath,
        to: Address,
        deadline: u64,
    ) -> Result<Vec<Amount>, AmmError> {
        self.ensure(deadline)?;
        self.config.check_path(path)?;
        let pairs = self.resolve(path)?;
        let amounts = math::get_amounts_in(amount_out, &oriented_reserves(path, &pairs), self.fee())?;
        let needed = amounts.first().copied().unwrap_or(Amount::ZERO);
        if needed > amount_in_max {
            warn!(%path, %amount_out, %needed, max = %amount_in_max, "swap input above maximum");
            return Err(AmmError::ExcessiveInputAmount);
        }
        self.execute(caller, path, &pairs, &amounts, to)?;
        Ok(amounts)
    }

    // -- pricing -------------------------------------------------------------

    /// Amount of B equivalent to `amount_a` at the given reserves.
    ///
    /// # Errors
    ///
    /// See [`math::quote`].
    pub fn quote(
        &self,
        amount_a: Amount,
        reserve_a: Amount,
        reserve_b: Amount,
    ) -> Result<Amount, AmmError> {
        math::quote(amount_a, reserve_a, reserve_b)
    }

    /// Exact-in output at the exchange fee.
    ///
    /// # Errors
    ///
    /// See [`math::get_amount_out`].
    pub fn get_amount_out(
        &self,
        amount_in: Amount,
        reserve_in: Amount,
        reserve_out: Amount,
    ) -> Result<Amount, AmmError> {
        math::get_amount_out(amount_in, reserve_in, reserve_out, self.fee())
    }

    /// Exact-out input at the exchange fee.
    ///
    /// # Errors
    ///
    /// See [`math::get_amount_in`].
    pub fn get_amount_in(
        &self,
        amount_out: Amount,
        reserve_in: Amount,
        reserve_out: Amount,
    ) -> Result<Amount, AmmError> {
        math::get_amount_in(amount_out, reserve_in, reserve_out, self.fee())
    }

    /// Per-hop amounts for selling `amount_in` along `path` at current
    /// reserves.
    ///
    /// # Errors
    ///
    /// [`AmmError::PairNotFound`] for a missing hop, or a pricing failure.
    pub fn get_amounts_out(&self, amount_in: Amount, path: &SwapPath) -> Result<Vec<Amount>, AmmError> {
        let pairs = self.resolve(path)?;
        math::get_amounts_out(amount_in, &oriented_reserves(path, &pairs), self.fee())
    }

    /// Per-hop amounts for buying `amount_out` along `path` at current
    /// reserves.
    ///
    /// # Errors
    ///
    /// [`AmmError::PairNotFound`] for a missing hop, or a pricing failure.
    pub fn get_amounts_in(&self, amount_out: Amount, path: &SwapPath) -> Result<Vec<Amount>, AmmError> {
        let pairs = self.resolve(path)?;
        math::get_amounts_in(amount_out, &oriented_reserves(path, &pairs), self.fee())
    }

    // -- helpers -------------------------------------------------------------

    fn ledger(&self) -> &dyn TokenLedger {
        self.registry.ledger().as_ref()
    }

    fn fee(&self) -> FeeTier {
        self.registry.config().fee_tier()
    }

    fn ensure(&self, deadline: u64) -> Result<(), AmmError> {
        let now = self.registry.clock().now();
        if now > deadline {
            warn!(deadline, now, "request expired");
            return Err(AmmError::Expired { deadline, now });
        }
        Ok(())
    }

    fn resolve(&self, path: &SwapPath) -> Result<Vec<Arc<Pair>>, AmmError> {
        path.hops()
            .map(|(input, output)| {
                self.registry
                    .pair_for(input, output)
                    .ok_or(AmmError::PairNotFound)
            })
            .collect()
    }

    /// Moves `amounts[0]` from `caller` into the first pair, then swaps hop
    /// by hop, sending each output to the next pair and the last to `to`.
    fn execute(
        &self,
        caller: Address,
        path: &SwapPath,
        pairs: &[Arc<Pair>],
        amounts: &[Amount],
        to: Address,
    ) -> Result<(), AmmError> {
        let first = pairs.first().ok_or(AmmError::InvalidPath("route has no hops"))?;
        let txn = Transaction::begin(self.ledger(), self.registry.events());

        self.ledger()
            .transfer_from(path.first(), self.address, caller, first.address(), amounts[0])?;
        for (i, ((input, _), pair)) in path.hops().zip(pairs).enumerate() {
            let out = amounts[i + 1];
            let (out_a, out_b) = if pair.tokens().is_first(&input) {
                (Amount::ZERO, out)
            } else {
                (out, Amount::ZERO)
            };
            let next = pairs.get(i + 1).map_or(to, |p| p.address());
            pair.swap(self.address, out_a, out_b, next)?;
        }

        txn.commit();
        debug!(%path, %caller, %to, amount_in = %amounts[0], amount_out = %amounts[amounts.len() - 1], "route executed");
        Ok(())
    }
}

/// `(reserve_in, reserve_out)` for each hop of `path`.
fn oriented_reserves(path: &SwapPath, pairs: &[Arc<Pair>]) -> Vec<(Amount, Amount)> {
    path.hops()
        .zip(pairs)
        .map(|((input, _), pair)| pair.get_reserves().oriented(pair.tokens().is_first(&input)))
        .collect()
}

/// Deposit amounts that preserve the pair's ratio within the request's
/// bounds. An empty pair takes the desired amounts as they are.
fn optimal_deposit(
    req: &AddLiquidity,
    reserve_a: Amount,
    reserve_b: Amount,
) -> Result<(Amount, Amount), AmmError> {
    let (amount_a, amount_b) = if reserve_a.is_zero() && reserve_b.is_zero() {
        (req.amount_a_desired, req.amount_b_desired)
    } else {
        let b_optimal = math::quote(req.amount_a_desired, reserve_a, reserve_b)?;
        if b_optimal <= req.amount_b_desired {
            (req.amount_a_desired, b_optimal)
        } else {
            let a_optimal = math::quote(req.amount_b_desired, reserve_b, reserve_a)?;
            if a_optimal > req.amount_a_desired {
                return Err(AmmError::InsufficientAmount("token a deposit above desired"));
            }
            (a_optimal, req.amount_b_desired)
        }
    };
    if amount_a < req.amount_a_min {
        warn!(%amount_a, min = %req.amount_a_min, "deposit below minimum");
        return Err(AmmError::InsufficientAmount("token a deposit below minimum"));
    }
    if amount_b < req.amount_b_min {
        warn!(%amount_b, min = %req.amount_b_min, "deposit below minimum");
        return Err(AmmError::InsufficientAmount("token b deposit below minimum"));
    }
    Ok((amount_a, amount_b))
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("address", &self.address)
            .field("config", &self.config)
            .field("registry", &self.registry)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::domain::Shares;
    use crate::ledger::InMemoryLedger;

    struct Setup {
        ledger: Arc<InMemoryLedger>,
        clock: Arc<ManualClock>,
        router: Router,
        x: Address,
        y: Address,
        alice: Address,
    }

    fn setup() -> Setup {
        let ledger = Arc::new(InMemoryLedger::new());
        let clock = Arc::new(ManualClock::new(1_000));
        let x = ledger.deploy_token("Token0", "TK0");
        let y = ledger.deploy_token("Token1", "TK1");
        let alice = Address::derive("alice");
        let Ok(router) = Router::bootstrap(
            ledger.clone(),
            clock.clone(),
            &ExchangeConfig::default(),
            Address::derive("router"),
        ) else {
            panic!("valid config");
        };
        for token in [x, y] {
            let Ok(()) = ledger.mint(token, alice, Amount::new(1_000_000)) else {
                panic!("mint failed");
            };
            let Ok(()) = ledger.approve(token, alice, router.address(), Amount::MAX) else {
                panic!("approve failed");
            };
        }
        Setup {
            ledger,
            clock,
            router,
            x,
            y,
            alice,
        }
    }

    fn request(s: &Setup, a: u128, b: u128) -> AddLiquidity {
        AddLiquidity::new(s.x, s.y, Amount::new(a), Amount::new(b), s.alice, 2_000)
    }

    #[test]
    fn zero_router_address_rejected() {
        let ledger = Arc::new(InMemoryLedger::new());
        let Ok(registry) = Registry::new(
            ledger,
            Arc::new(ManualClock::new(0)),
            crate::config::PairConfig::default(),
        ) else {
            panic!("valid config");
        };
        let result = Router::new(Arc::new(registry), Address::zero(), RouterConfig::default());
        assert!(matches!(result, Err(AmmError::ZeroAddress)));
    }

    #[test]
    fn add_liquidity_creates_pair_and_uses_desired_amounts() {
        let s = setup();
        let Ok(added) = s.router.add_liquidity(s.alice, &request(&s, 4_000, 1_000)) else {
            panic!("deposit failed");
        };
        assert_eq!(added.amount_a, Amount::new(4_000));
        assert_eq!(added.amount_b, Amount::new(1_000));
        assert_eq!(added.shares, Shares::new(1_000));
        assert!(s.router.registry().get_pair(s.x, s.y).is_some());
    }

    #[test]
    fn add_liquidity_trims_the_larger_side() {
        let s = setup();
        let Ok(_) = s.router.add_liquidity(s.alice, &request(&s, 4_000, 1_000)) else {
            panic!("seed failed");
        };
        let Ok(added) = s.router.add_liquidity(s.alice, &request(&s, 4_000, 4_000)) else {
            panic!("deposit failed");
        };
        assert_eq!(added.amount_a, Amount::new(4_000));
        assert_eq!(added.amount_b, Amount::new(1_000));

        // reversed caller order maps amounts back to the caller's tokens
        let reversed = AddLiquidity::new(s.y, s.x, Amount::new(4_000), Amount::new(400), s.alice, 2_000);
        let Ok(added) = s.router.add_liquidity(s.alice, &reversed) else {
            panic!("reversed deposit failed");
        };
        assert_eq!(added.amount_a, Amount::new(100));
        assert_eq!(added.amount_b, Amount::new(400));
    }

    #[test]
    fn add_liquidity_below_minimum_leaves_no_pair() {
        let s = setup();
        let req = request(&s, 1_000, 1_000);
        // first deposit at the minimum mints nothing
        assert_eq!(
            s.router.add_liquidity(s.alice, &req),
            Err(AmmError::InsufficientLiquidityMinted)
        );
        assert_eq!(s.router.registry().all_pairs_length(), 0);
        assert!(s.router.registry().events().is_empty());
        let Ok(balance) = s.ledger.balance_of(s.x, s.alice) else {
            panic!("known token");
        };
        assert_eq!(balance, Amount::new(1_000_000));
    }

    #[test]
    fn add_liquidity_enforces_minimums() {
        let s = setup();
        let Ok(_) = s.router.add_liquidity(s.alice, &request(&s, 4_000, 1_000)) else {
            panic!("seed failed");
        };
        let req = request(&s, 4_000, 4_000).with_minimums(Amount::ZERO, Amount::new(1_001));
        assert_eq!(
            s.router.add_liquidity(s.alice, &req),
            Err(AmmError::InsufficientAmount("token b deposit below minimum"))
        );
    }

    #[test]
    fn expired_requests_fail_at_entry() {
        let s = setup();
        s.clock.set(2_001);
        assert_eq!(
            s.router.add_liquidity(s.alice, &request(&s, 4_000, 1_000)),
            Err(AmmError::Expired {
                deadline: 2_000,
                now: 2_001
            })
        );
        s.clock.set(2_000);
        assert!(s.router.add_liquidity(s.alice, &request(&s, 4_000, 1_000)).is_ok());
    }

    #[test]
    fn remove_liquidity_without_pair() {
        let s = setup();
        let req = RemoveLiquidity::new(s.x, s.y, Shares::new(1), s.alice, 2_000);
        assert_eq!(
            s.router.remove_liquidity(s.alice, &req),
            Err(AmmError::PairNotFound)
        );
    }

    #[test]
    fn pricing_helpers_use_exchange_fee() {
        let s = setup();
        let r = Amount::new(1_000);
        assert_eq!(s.router.get_amount_out(Amount::new(100), r, r), Ok(Amount::new(90)));
        assert_eq!(s.router.get_amount_in(Amount::new(90), r, r), Ok(Amount::new(100)));
        assert_eq!(s.router.quote(Amount::new(10), r, Amount::new(2_000)), Ok(Amount::new(20)));
        assert_eq!(
            s.router.quote(Amount::new(10), Amount::ZERO, r),
            Err(AmmError::InsufficientLiquidity)
        );
    }

    #[test]
    fn swap_path_policy_is_applied() {
        let s = setup();
        let Ok(config) = RouterConfig::new(false, 8) else {
            panic!("valid config");
        };
        let Ok(strict) = Router::new(Arc::clone(s.router.registry()), Address::derive("strict"), config) else {
            panic!("valid router");
        };
        let Ok(path) = SwapPath::new(vec![s.x, s.y, s.x]) else {
            panic!("valid path");
        };
        assert_eq!(
            strict.swap_exact_input(s.alice, Amount::new(10), Amount::ZERO, &path, s.alice, 2_000),
            Err(AmmError::InvalidPath("token repeated in path"))
        );
    }
}
