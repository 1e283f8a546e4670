//! Outcomes returned by pair and router operations.

use core::fmt;

use super::{Amount, Shares};

/// Token flows observed by a single pair swap, in canonical `(a, b)` order.
///
/// The inputs are derived from balance deltas after the outputs were paid,
/// so at least one of them is non-zero in every receipt a pair returns.
///
/// ```
/// use pairswap::domain::{Amount, SwapReceipt};
///
/// let r = SwapReceipt::new(Amount::new(100), Amount::ZERO, Amount::ZERO, Amount::new(90));
/// assert_eq!(r.amount_in_a(), Amount::new(100));
/// assert_eq!(r.amount_out_b(), Amount::new(90));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwapReceipt {
    amount_in_a: Amount,
    amount_in_b: Amount,
    amount_out_a: Amount,
    amount_out_b: Amount,
}

impl SwapReceipt {
    /// Creates a receipt from the four observed flows.
    pub const fn new(
        amount_in_a: Amount,
        amount_in_b: Amount,
        amount_out_a: Amount,
        amount_out_b: Amount,
    ) -> Self {
        Self {
            amount_in_a,
            amount_in_b,
            amount_out_a,
            amount_out_b,
        }
    }

    /// First-token amount received by the pair.
    pub const fn amount_in_a(&self) -> Amount {
        self.amount_in_a
    }

    /// Second-token amount received by the pair.
    pub const fn amount_in_b(&self) -> Amount {
        self.amount_in_b
    }

    /// First-token amount paid out.
    pub const fn amount_out_a(&self) -> Amount {
        self.amount_out_a
    }

    /// Second-token amount paid out.
    pub const fn amount_out_b(&self) -> Amount {
        self.amount_out_b
    }
}

impl fmt::Display for SwapReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "in=({}, {}) out=({}, {})",
            self.amount_in_a, self.amount_in_b, self.amount_out_a, self.amount_out_b
        )
    }
}

/// Result of a router deposit, in the caller's token order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LiquidityAdded {
    /// Amount of the caller's first token actually deposited.
    pub amount_a: Amount,
    /// Amount of the caller's second token actually deposited.
    pub amount_b: Amount,
    /// Shares credited to the recipient.
    pub shares: Shares,
}

/// Result of a router withdrawal, in the caller's token order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LiquidityRemoved {
    /// Amount of the caller's first token returned.
    pub amount_a: Amount,
    /// Amount of the caller's second token returned.
    pub amount_b: Amount,
}
