//! Committed state of a pair.

use std::collections::HashMap;

use crate::domain::{Address, Amount, PriceCumulative, Reserves, Shares};
use crate::error::AmmError;
use crate::math::{price_increment, CheckedArithmetic};

/// Reserves and price accumulators. Small enough to copy per operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct PoolState {
    pub(crate) reserves: Reserves,
    pub(crate) price_a_cumulative: u128,
    pub(crate) price_b_cumulative: u128,
}

impl PoolState {
    /// Integrates the old price over the time since the last update, then
    /// records `balance_a`/`balance_b` as the new reserves.
    pub(crate) fn update(&mut self, balance_a: Amount, balance_b: Amount, now: u64) {
        let elapsed = now.saturating_sub(self.reserves.last_update);
        let Reserves {
            reserve_a,
            reserve_b,
            ..
        } = self.reserves;
        if elapsed > 0 && !self.reserves.is_empty() {
            self.price_a_cumulative = self
                .price_a_cumulative
                .wrapping_add(price_increment(reserve_a, reserve_b, elapsed));
            self.price_b_cumulative = self
                .price_b_cumulative
                .wrapping_add(price_increment(reserve_b, reserve_a, elapsed));
        }
        self.reserves = Reserves::new(balance_a, balance_b, now);
    }

    /// Accumulators as they would read at `now` if nothing traded since
    /// the last update.
    pub(crate) fn cumulative_at(&self, now: u64) -> PriceCumulative {
        let mut projected = *self;
        projected.update(self.reserves.reserve_a, self.reserves.reserve_b, now);
        PriceCumulative::new(
            projected.price_a_cumulative,
            projected.price_b_cumulative,
            now.max(self.reserves.last_update),
        )
    }
}

/// Share balances, allowances and total supply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ShareBook {
    pub(crate) total: Shares,
    balances: HashMap<Address, Shares>,
    allowances: HashMap<(Address, Address), Shares>,
}

impl ShareBook {
    pub(crate) fn balance(&self, holder: &Address) -> Shares {
        self.balances.get(holder).copied().unwrap_or(Shares::ZERO)
    }

    pub(crate) fn allowance(&self, owner: &Address, spender: &Address) -> Shares {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or(Shares::ZERO)
    }

    pub(crate) fn mint(&mut self, to: Address, amount: Shares) -> Result<(), AmmError> {
        let total = self.total.safe_add(&amount)?;
        // every balance is bounded by the total
        let balance = self.balance(&to).safe_add(&amount)?;
        self.total = total;
        self.balances.insert(to, balance);
        Ok(())
    }

    pub(crate) fn burn(&mut self, from: Address, amount: Shares) -> Result<(), AmmError> {
        let balance = self.balance(&from).safe_sub(&amount)?;
        let total = self.total.safe_sub(&amount)?;
        self.total = total;
        self.set_balance(from, balance);
        Ok(())
    }

    pub(crate) fn transfer(
        &mut self,
        from: Address,
        to: Address,
        amount: Shares,
    ) -> Result<(), AmmError> {
        let debited = self.balance(&from).safe_sub(&amount)?;
        if from == to {
            return Ok(());
        }
        let credited = self.balance(&to).safe_add(&amount)?;
        self.set_balance(from, debited);
        self.set_balance(to, credited);
        Ok(())
    }

    pub(crate) fn spend_allowance(
        &mut self,
        owner: Address,
        spender: Address,
        amount: Shares,
    ) -> Result<(), AmmError> {
        let allowed = self.allowance(&owner, &spender);
        if allowed == Shares::MAX {
            return Ok(());
        }
        let remaining = allowed
            .checked_sub(&amount)
            .ok_or(AmmError::InsufficientAllowance)?;
        self.approve(owner, spender, remaining);
        Ok(())
    }

    pub(crate) fn approve(&mut self, owner: Address, spender: Address, amount: Shares) {
        if amount.is_zero() {
            self.allowances.remove(&(owner, spender));
        } else {
            self.allowances.insert((owner, spender), amount);
        }
    }

    fn set_balance(&mut self, holder: Address, amount: Shares) {
        if amount.is_zero() {
            self.balances.remove(&holder);
        } else {
            self.balances.insert(holder, amount);
        }
    }

    #[cfg(test)]
    pub(crate) fn sum_of_balances(&self) -> Option<Shares> {
        self.balances
            .values()
            .try_fold(Shares::ZERO, |acc, s| acc.checked_add(s))
    }
}

/// Everything a rollback has to restore.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct PairState {
    pub(crate) pool: PoolState,
    pub(crate) book: ShareBook,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn amt(v: u128) -> Amount {
        Amount::new(v)
    }

    #[test]
    fn update_accumulates_previous_price() {
        let one = 1u128 << 64;
        let mut pool = PoolState::default();
        pool.update(amt(100), amt(300), 10);
        assert_eq!(pool.price_a_cumulative, 0);
        pool.update(amt(100), amt(300), 14);
        assert_eq!(pool.price_a_cumulative, 3 * one * 4);
        // 100/300 in UQ64.64, floored, over 4 seconds
        assert_eq!(pool.price_b_cumulative, (one / 3) * 4);
        assert_eq!(pool.reserves.last_update, 14);
    }

    #[test]
    fn cumulative_at_projects_without_mutating() {
        let one = 1u128 << 64;
        let mut pool = PoolState::default();
        pool.update(amt(10), amt(10), 0);
        let view = pool.cumulative_at(5);
        assert_eq!(view.price_a_cumulative, 5 * one);
        assert_eq!(view.timestamp, 5);
        assert_eq!(pool.price_a_cumulative, 0);
    }

    #[test]
    fn book_tracks_total() {
        let a = Address::derive("a");
        let b = Address::derive("b");
        let mut book = ShareBook::default();
        let Ok(()) = book.mint(a, Shares::new(100)) else {
            panic!("mint failed");
        };
        let Ok(()) = book.transfer(a, b, Shares::new(40)) else {
            panic!("transfer failed");
        };
        let Ok(()) = book.burn(b, Shares::new(10)) else {
            panic!("burn failed");
        };
        assert_eq!(book.total, Shares::new(90));
        assert_eq!(book.sum_of_balances(), Some(book.total));
        let Err(AmmError::Underflow(_)) = book.transfer(b, a, Shares::new(31)) else {
            panic!("expected Underflow");
        };
    }

    #[test]
    fn allowances() {
        let a = Address::derive("a");
        let s = Address::derive("s");
        let mut book = ShareBook::default();
        book.approve(a, s, Shares::new(5));
        let Ok(()) = book.spend_allowance(a, s, Shares::new(3)) else {
            panic!("spend failed");
        };
        assert_eq!(book.allowance(&a, &s), Shares::new(2));
        assert_eq!(
            book.spend_allowance(a, s, Shares::new(3)),
            Err(AmmError::InsufficientAllowance)
        );
        book.approve(a, s, Shares::MAX);
        let Ok(()) = book.spend_allowance(a, s, Shares::new(1_000)) else {
            panic!("spend failed");
        };
        assert_eq!(book.allowance(&a, &s), Shares::MAX);
    }
}
