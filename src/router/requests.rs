//! Liquidity requests accepted by the router.

use crate::domain::{Address, Amount, Shares};

/// A deposit into the couple `(token_a, token_b)`.
///
/// Amounts are in the caller's token order, not the pair's canonical
/// order. The router deposits at the pair's current ratio, never more than
/// the desired amounts and never less than the minimums.
///
/// # Examples
///
/// ```
/// use pairswap::domain::{Address, Amount};
/// use pairswap::router::AddLiquidity;
///
/// let req = AddLiquidity::new(
///     Address::derive("USDC"),
///     Address::derive("WETH"),
///     Amount::new(2_000),
///     Amount::new(1),
///     Address::derive("alice"),
///     1_700_000_000,
/// )
/// .with_minimums(Amount::new(1_990), Amount::new(1));
/// assert_eq!(req.amount_a_min, Amount::new(1_990));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AddLiquidity {
    /// Caller's first token.
    pub token_a: Address,
    /// Caller's second token.
    pub token_b: Address,
    /// Upper bound on the first-token deposit.
    pub amount_a_desired: Amount,
    /// Upper bound on the second-token deposit.
    pub amount_b_desired: Amount,
    /// Lower bound on the first-token deposit.
    pub amount_a_min: Amount,
    /// Lower bound on the second-token deposit.
    pub amount_b_min: Amount,
    /// Receives the minted shares.
    pub to: Address,
    /// Last acceptable clock reading, in seconds.
    pub deadline: u64,
}

impl AddLiquidity {
    /// A request with zero minimums.
    #[must_use]
    pub const fn new(
        token_a: Address,
        token_b: Address,
        amount_a_desired: Amount,
        amount_b_desired: Amount,
        to: Address,
        deadline: u64,
    ) -> Self {
        Self {
            token_a,
            token_b,
            amount_a_desired,
            amount_b_desired,
            amount_a_min: Amount::ZERO,
            amount_b_min: Amount::ZERO,
            to,
            deadline,
        }
    }

    /// Sets both slippage floors.
    #[must_use]
    pub const fn with_minimums(mut self, amount_a_min: Amount, amount_b_min: Amount) -> Self {
        self.amount_a_min = amount_a_min;
        self.amount_b_min = amount_b_min;
        self
    }
}

/// A withdrawal of `shares` from the couple `(token_a, token_b)`.
///
/// The caller must have approved the router for at least `shares` on the
/// pair's share token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RemoveLiquidity {
    /// Caller's first token.
    pub token_a: Address,
    /// Caller's second token.
    pub token_b: Address,
    /// Shares to redeem.
    pub shares: Shares,
    /// Lower bound on the first-token payout.
    pub amount_a_min: Amount,
    /// Lower bound on the second-token payout.
    pub amount_b_min: Amount,
    /// Receives both tokens.
    pub to: Address,
    /// Last acceptable clock reading, in seconds.
    pub deadline: u64,
}

impl RemoveLiquidity {
    /// A request with zero minimums.
    #[must_use]
    pub const fn new(
        token_a: Address,
        token_b: Address,
        shares: Shares,
        to: Address,
        deadline: u64,
    ) -> Self {
        Self {
            token_a,
            token_b,
            shares,
            amount_a_min: Amount::ZERO,
            amount_b_min: Amount::ZERO,
            to,
            deadline,
        }
    }

    /// Sets both slippage floors.
    #[must_use]
    pub const fn with_minimums(mut self, amount_a_min: Amount, amount_b_min: Amount) -> Self {
        self.amount_a_min = amount_a_min;
        self.amount_b_min = amount_b_min;
        self
    }
}
