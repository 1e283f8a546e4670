//! The pair's liquidity share token.
//!
//! Shares move like a fungible token: balances, transfers and allowances.
//! The router pulls a holder's shares into the pair before a burn, which
//! is why `transfer_shares_from` exists.

use tracing::trace;

use super::Pair;
use crate::domain::{Address, Shares};
use crate::error::AmmError;
use crate::events::Event;

impl Pair {
    /// Total outstanding shares, including the locked minimum.
    #[must_use]
    pub fn total_shares(&self) -> Shares {
        self.state.read().book.total
    }

    /// Shares held by `holder`.
    #[must_use]
    pub fn share_balance_of(&self, holder: Address) -> Shares {
        self.state.read().book.balance(&holder)
    }

    /// Shares `spender` may still move on behalf of `owner`.
    #[must_use]
    pub fn share_allowance(&self, owner: Address, spender: Address) -> Shares {
        self.state.read().book.allowance(&owner, &spender)
    }

    /// Moves `amount` of `owner`'s shares to `to`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Underflow`] if `owner` holds fewer shares.
    /// - [`AmmError::LockedLiquidity`] if `owner` is the lock address.
    /// - [`AmmError::Reentrancy`] while a pair operation is in progress.
    pub fn transfer_shares(
        &self,
        owner: Address,
        to: Address,
        amount: Shares,
    ) -> Result<(), AmmError> {
        self.move_shares(None, owner, to, amount)
    }

    /// Moves `amount` of `owner`'s shares to `to` on behalf of `spender`.
    ///
    /// # Errors
    ///
    /// As [`transfer_shares`](Self::transfer_shares), plus
    /// [`AmmError::InsufficientAllowance`]. The balance is checked first.
    pub fn transfer_shares_from(
        &self,
        spender: Address,
        owner: Address,
        to: Address,
        amount: Shares,
    ) -> Result<(), AmmError> {
        self.move_shares(Some(spender), owner, to, amount)
    }

    /// Sets `spender`'s allowance over `owner`'s shares. `Shares::MAX`
    /// never decreases.
    ///
    /// # Errors
    ///
    /// [`AmmError::Reentrancy`] while a pair operation is in progress.
    pub fn approve_shares(
        &self,
        owner: Address,
        spender: Address,
        amount: Shares,
    ) -> Result<(), AmmError> {
        if self.is_locked() {
            return Err(AmmError::Reentrancy);
        }
        self.update_state(|state| {
            state.book.approve(owner, spender, amount);
            Ok(())
        })?;
        self.events().emit(Event::ShareApproval {
            pair: self.address(),
            owner,
            spender,
            shares: amount,
        });
        Ok(())
    }

    fn move_shares(
        &self,
        spender: Option<Address>,
        owner: Address,
        to: Address,
        amount: Shares,
    ) -> Result<(), AmmError> {
        // a locked operation holds an uncommitted copy of the book
        if self.is_locked() {
            return Err(AmmError::Reentrancy);
        }
        let lock_address = self.config().lock_address();
        self.update_state(|state| {
            let book = &mut state.book;
            if book.balance(&owner) < amount {
                return Err(AmmError::Underflow("share balance too low"));
            }
            if owner == lock_address {
                return Err(AmmError::LockedLiquidity);
            }
            if let Some(spender) = spender {
                book.spend_allowance(owner, spender, amount)?;
            }
            book.transfer(owner, to, amount)
        })?;
        self.events().emit(Event::ShareTransfer {
            pair: self.address(),
            from: owner,
            to,
            shares: amount,
        });
        trace!(pair = %self.address(), %owner, %to, %amount, "shares moved");
        Ok(())
    }
}
