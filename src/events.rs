//! Exchange events and the shared append-only log.
//!
//! Every state transition appends an [`Event`]. The log is truncated back
//! to its previous length when an enclosing operation fails, so observers
//! only ever see events of committed operations.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::trace;

use crate::domain::{Address, Amount, Shares};

/// Something observable that happened on the exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Event {
    /// A pair was registered.
    PairCreated {
        /// Canonical first token.
        token_a: Address,
        /// Canonical second token.
        token_b: Address,
        /// Address of the new pair.
        pair: Address,
        /// 0-based position in the registry's pair sequence.
        pair_index: usize,
    },
    /// Liquidity was deposited.
    Mint {
        /// Pair that issued shares.
        pair: Address,
        /// Account that invoked the mint.
        sender: Address,
        /// First-token deposit.
        amount_a: Amount,
        /// Second-token deposit.
        amount_b: Amount,
        /// Shares credited to `to`.
        shares: Shares,
        /// Share recipient.
        to: Address,
    },
    /// Liquidity was redeemed.
    Burn {
        /// Pair that redeemed shares.
        pair: Address,
        /// Account that invoked the burn.
        sender: Address,
        /// First-token amount paid out.
        amount_a: Amount,
        /// Second-token amount paid out.
        amount_b: Amount,
        /// Shares destroyed.
        shares: Shares,
        /// Token recipient.
        to: Address,
    },
    /// Tokens were exchanged.
    Swap {
        /// Pair that executed the swap.
        pair: Address,
        /// Account that invoked the swap.
        sender: Address,
        /// First-token amount received.
        amount_in_a: Amount,
        /// Second-token amount received.
        amount_in_b: Amount,
        /// First-token amount paid out.
        amount_out_a: Amount,
        /// Second-token amount paid out.
        amount_out_b: Amount,
        /// Output recipient.
        to: Address,
    },
    /// Reserves were set to the observed balances.
    Sync {
        /// Pair whose reserves changed.
        pair: Address,
        /// Account whose operation moved the reserves.
        sender: Address,
        /// New first-token reserve.
        reserve_a: Amount,
        /// New second-token reserve.
        reserve_b: Amount,
    },
    /// Balance in excess of the reserves was paid out.
    Skim {
        /// Pair that held the excess.
        pair: Address,
        /// Account that invoked the skim.
        sender: Address,
        /// First-token excess paid out.
        amount_a: Amount,
        /// Second-token excess paid out.
        amount_b: Amount,
        /// Recipient of the excess.
        to: Address,
    },
    /// Shares moved between holders.
    ShareTransfer {
        /// Pair whose shares moved.
        pair: Address,
        /// Debited holder.
        from: Address,
        /// Credited holder.
        to: Address,
        /// Shares moved.
        shares: Shares,
    },
    /// A share allowance was set.
    ShareApproval {
        /// Pair whose shares are approved.
        pair: Address,
        /// Holder granting the allowance.
        owner: Address,
        /// Account allowed to spend.
        spender: Address,
        /// New allowance.
        shares: Shares,
    },
}

/// Shared, append-only event sink. Cloning shares the same log.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    inner: Arc<RwLock<Vec<Event>>>,
}

impl EventLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `event`.
    pub fn emit(&self, event: Event) {
        trace!(?event, "event");
        self.inner.write().push(event);
    }

    /// Number of events recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Copy of every recorded event.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Event> {
        self.inner.read().clone()
    }

    /// Events recorded at or after position `start`.
    #[must_use]
    pub fn since(&self, start: usize) -> Vec<Event> {
        self.inner.read().iter().skip(start).cloned().collect()
    }

    /// The most recent event.
    #[must_use]
    pub fn last(&self) -> Option<Event> {
        self.inner.read().last().cloned()
    }

    pub(crate) fn truncate(&self, len: usize) {
        self.inner.write().truncate(len);
    }
}
