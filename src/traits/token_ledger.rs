//! The external token ledger consumed by pairs and the router.
//!
//! [`TokenLedger`] is the seam between the exchange and whatever holds
//! token balances. Pairs never trust amounts handed to them: they read
//! their own balances back through [`TokenLedger::balance_of`] after every
//! transfer and derive deposits from the difference.
//!
//! # All-or-nothing composition
//!
//! Multi-step operations open a [`Checkpoint`] before their first transfer
//! and either [`commit`](TokenLedger::commit) it or
//! [`revert`](TokenLedger::revert) it. Checkpoints nest and must be closed
//! in LIFO order. Reverting restores every balance and allowance touched
//! since the checkpoint was opened.
//!
//! State kept outside the ledger joins the same history through
//! [`TokenLedger::on_revert`]: pairs leave an undo action with the ledger
//! each time they commit, so any revert that discards a nested transfer
//! also discards the pair state written alongside it.

use crate::domain::{Address, Amount};
use crate::error::LedgerError;

/// Undo action run when the checkpoint it was recorded under is reverted.
pub type RevertAction = Box<dyn FnOnce() + Send>;

/// Marker for a point in the ledger's history that can be restored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Checkpoint(usize);

impl Checkpoint {
    /// Wraps a ledger-specific position.
    #[must_use]
    pub const fn new(position: usize) -> Self {
        Self(position)
    }

    /// Returns the ledger-specific position.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.0
    }
}

/// Balances and allowances for any number of tokens.
///
/// Implementations must be usable through a shared reference from many
/// pairs at once. A transfer may call back into the exchange before it
/// returns (a ledger hook), so implementations must not hold internal locks
/// across such callbacks.
pub trait TokenLedger: Send + Sync {
    /// Balance of `holder` in `token`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::UnknownToken`] if the token does not exist.
    fn balance_of(&self, token: Address, holder: Address) -> Result<Amount, LedgerError>;

    /// Moves `amount` of `token` from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Fails if the token is unknown, the balance is short, the recipient
    /// would overflow, or a hook rejects the transfer. A failed transfer
    /// leaves no trace.
    fn transfer(
        &self,
        token: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), LedgerError>;

    /// Moves `amount` of `token` from `from` to `to` on behalf of
    /// `spender`, consuming allowance.
    ///
    /// # Errors
    ///
    /// As [`transfer`](Self::transfer), plus
    /// [`LedgerError::InsufficientAllowance`].
    fn transfer_from(
        &self,
        token: Address,
        spender: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), LedgerError>;

    /// Sets the allowance of `spender` over `owner`'s `token` to `amount`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::UnknownToken`] if the token does not exist.
    fn approve(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
        amount: Amount,
    ) -> Result<(), LedgerError>;

    /// Remaining allowance of `spender` over `owner`'s `token`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::UnknownToken`] if the token does not exist.
    fn allowance(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
    ) -> Result<Amount, LedgerError>;

    /// Opens a restorable point.
    fn checkpoint(&self) -> Checkpoint;

    /// Keeps every change made since `checkpoint`.
    fn commit(&self, checkpoint: Checkpoint);

    /// Undoes every change made since `checkpoint`, running recorded
    /// [`RevertAction`]s most recent first.
    fn revert(&self, checkpoint: Checkpoint);

    /// Records `action` against the innermost open checkpoint.
    ///
    /// The action runs if that checkpoint, or any checkpoint enclosing it,
    /// is reverted. It is dropped once the outermost checkpoint commits,
    /// and when no checkpoint is open.
    fn on_revert(&self, action: RevertAction);
}
