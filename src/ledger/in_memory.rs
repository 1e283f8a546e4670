//! Journaled in-memory token ledger.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::{debug, trace};

use crate::domain::{Address, Amount};
use crate::error::LedgerError;
use crate::traits::{Checkpoint, RevertAction, TokenLedger};

/// A completed balance movement, as seen by a [`TransferHook`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transfer {
    /// Token moved.
    pub token: Address,
    /// Debited holder.
    pub from: Address,
    /// Credited holder.
    pub to: Address,
    /// Amount moved.
    pub amount: Amount,
}

/// Callback run after every balance movement, before the transfer returns.
///
/// The ledger's own lock is released while the hook runs, so the hook may
/// call back into the exchange. Returning an error undoes the transfer.
pub type TransferHook = Arc<dyn Fn(&Transfer) -> Result<(), LedgerError> + Send + Sync>;

#[derive(Debug, Clone)]
struct TokenInfo {
    name: String,
    symbol: String,
    total_supply: Amount,
}

enum JournalEntry {
    Balance {
        token: Address,
        holder: Address,
        previous: Amount,
    },
    Allowance {
        token: Address,
        owner: Address,
        spender: Address,
        previous: Amount,
    },
    Supply {
        token: Address,
        previous: Amount,
    },
    Action(RevertAction),
}

#[derive(Default)]
struct LedgerState {
    tokens: HashMap<Address, TokenInfo>,
    balances: HashMap<(Address, Address), Amount>,
    allowances: HashMap<(Address, Address, Address), Amount>,
    journal: Vec<JournalEntry>,
    open_checkpoints: usize,
}

impl LedgerState {
    fn ensure_token(&self, token: Address) -> Result<(), LedgerError> {
        if self.tokens.contains_key(&token) {
            Ok(())
        } else {
            Err(LedgerError::UnknownToken(token))
        }
    }

    fn balance(&self, token: Address, holder: Address) -> Amount {
        self.balances
            .get(&(token, holder))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    fn allowance(&self, token: Address, owner: Address, spender: Address) -> Amount {
        self.allowances
            .get(&(token, owner, spender))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    fn set_balance(&mut self, token: Address, holder: Address, value: Amount) {
        if self.open_checkpoints > 0 {
            let previous = self.balance(token, holder);
            self.journal.push(JournalEntry::Balance {
                token,
                holder,
                previous,
            });
        }
        self.balances.insert((token, holder), value);
    }

    fn set_allowance(&mut self, token: Address, owner: Address, spender: Address, value: Amount) {
        if self.open_checkpoints > 0 {
            let previous = self.allowance(token, owner, spender);
            self.journal.push(JournalEntry::Allowance {
                token,
                owner,
                spender,
                previous,
            });
        }
        self.allowances.insert((token, owner, spender), value);
    }

    fn set_supply(&mut self, token: Address, value: Amount) {
        let open = self.open_checkpoints > 0;
        if let Some(info) = self.tokens.get_mut(&token) {
            if open {
                self.journal.push(JournalEntry::Supply {
                    token,
                    previous: info.total_supply,
                });
            }
            info.total_supply = value;
        }
    }

    fn move_balance(
        &mut self,
        token: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        self.ensure_token(token)?;
        let from_balance = self.balance(token, from);
        let debited = from_balance
            .checked_sub(&amount)
            .ok_or(LedgerError::InsufficientBalance {
                token,
                holder: from,
            })?;
        if from == to {
            return Ok(());
        }
        let credited = self
            .balance(token, to)
            .checked_add(&amount)
            .ok_or(LedgerError::BalanceOverflow)?;
        self.set_balance(token, from, debited);
        self.set_balance(token, to, credited);
        Ok(())
    }

    /// Restores one entry. External actions are handed back so they run
    /// without the ledger lock held.
    fn undo(&mut self, entry: JournalEntry) -> Option<RevertAction> {
        match entry {
            JournalEntry::Balance {
                token,
                holder,
                previous,
            } => {
                self.balances.insert((token, holder), previous);
            }
            JournalEntry::Allowance {
                token,
                owner,
                spender,
                previous,
            } => {
                self.allowances.insert((token, owner, spender), previous);
            }
            JournalEntry::Supply { token, previous } => {
                if let Some(info) = self.tokens.get_mut(&token) {
                    info.total_supply = previous;
                }
            }
            JournalEntry::Action(action) => return Some(action),
        }
        None
    }
}

/// An in-process multi-token ledger.
///
/// Each deployed token behaves like a minimal fungible token contract:
/// balances, allowances (with `Amount::MAX` meaning unlimited) and a total
/// supply grown by [`mint`](Self::mint). Every change made while a
/// [`Checkpoint`] is open is journaled so it can be reverted.
///
/// Mutations are assumed to be serialized by the caller; checkpoints from
/// concurrent, unrelated operations would interleave in one journal.
///
/// # Examples
///
/// ```
/// use pairswap::domain::{Address, Amount};
/// use pairswap::ledger::InMemoryLedger;
/// use pairswap::traits::TokenLedger;
///
/// let ledger = InMemoryLedger::new();
/// let token = ledger.deploy_token("Token0", "TK0");
/// let alice = Address::derive("alice");
/// ledger.mint(token, alice, Amount::new(500)).expect("known token");
/// assert_eq!(ledger.balance_of(token, alice), Ok(Amount::new(500)));
/// ```
#[derive(Default)]
pub struct InMemoryLedger {
    state: Mutex<LedgerState>,
    hook: RwLock<Option<TransferHook>>,
}

impl InMemoryLedger {
    /// Creates an empty ledger with no tokens.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new token and returns its address.
    ///
    /// The address is derived from the name, the symbol and the number of
    /// tokens already deployed, so repeated deployments never collide.
    pub fn deploy_token(&self, name: &str, symbol: &str) -> Address {
        let mut state = self.state.lock();
        let address = Address::derive(&format!("token:{}:{name}:{symbol}", state.tokens.len()));
        state.tokens.insert(
            address,
            TokenInfo {
                name: name.to_owned(),
                symbol: symbol.to_owned(),
                total_supply: Amount::ZERO,
            },
        );
        debug!(%address, name, symbol, "token deployed");
        address
    }

    /// Creates `amount` new tokens for `to`.
    ///
    /// # Errors
    ///
    /// Fails if the token is unknown or the supply would overflow.
    pub fn mint(&self, token: Address, to: Address, amount: Amount) -> Result<(), LedgerError> {
        let mut state = self.state.lock();
        state.ensure_token(token)?;
        let supply = state
            .tokens
            .get(&token)
            .map(|info| info.total_supply)
            .unwrap_or(Amount::ZERO)
            .checked_add(&amount)
            .ok_or(LedgerError::BalanceOverflow)?;
        let balance = state
            .balance(token, to)
            .checked_add(&amount)
            .ok_or(LedgerError::BalanceOverflow)?;
        state.set_supply(token, supply);
        state.set_balance(token, to, balance);
        trace!(%token, %to, %amount, "minted");
        Ok(())
    }

    /// Token name, if deployed.
    #[must_use]
    pub fn name(&self, token: Address) -> Option<String> {
        self.state.lock().tokens.get(&token).map(|i| i.name.clone())
    }

    /// Token symbol, if deployed.
    #[must_use]
    pub fn symbol(&self, token: Address) -> Option<String> {
        self.state.lock().tokens.get(&token).map(|i| i.symbol.clone())
    }

    /// Total minted supply, if deployed.
    #[must_use]
    pub fn total_supply(&self, token: Address) -> Option<Amount> {
        self.state.lock().tokens.get(&token).map(|i| i.total_supply)
    }

    /// Installs a hook run after every balance movement.
    pub fn set_transfer_hook(&self, hook: TransferHook) {
        *self.hook.write() = Some(hook);
    }

    /// Removes the transfer hook.
    pub fn clear_transfer_hook(&self) {
        *self.hook.write() = None;
    }

    fn settle(&self, checkpoint: Checkpoint, result: Result<(), LedgerError>) -> Result<(), LedgerError> {
        match result {
            Ok(()) => self.commit(checkpoint),
            Err(_) => self.revert(checkpoint),
        }
        result
    }
}

impl fmt::Debug for InMemoryLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("InMemoryLedger")
            .field("tokens", &state.tokens.len())
            .field("open_checkpoints", &state.open_checkpoints)
            .field("hook", &self.hook.read().is_some())
            .finish()
    }
}

impl TokenLedger for InMemoryLedger {
    fn balance_of(&self, token: Address, holder: Address) -> Result<Amount, LedgerError> {
        let state = self.state.lock();
        state.ensure_token(token)?;
        Ok(state.balance(token, holder))
    }

    fn transfer(
        &self,
        token: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let checkpoint = self.checkpoint();
        let moved = self.state.lock().move_balance(token, from, to, amount);
        let result = moved.and_then(|()| {
            // clone out so the hook can replace itself
            let hook = self.hook.read().clone();
            match hook {
                Some(hook) => hook(&Transfer {
                    token,
                    from,
                    to,
                    amount,
                }),
                None => Ok(()),
            }
        });
        if result.is_ok() {
            trace!(%token, %from, %to, %amount, "transfer");
        }
        self.settle(checkpoint, result)
    }

    fn transfer_from(
        &self,
        token: Address,
        spender: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let checkpoint = self.checkpoint();
        let spent = {
            let mut state = self.state.lock();
            state.ensure_token(token).and_then(|()| {
                let allowed = state.allowance(token, from, spender);
                if allowed == Amount::MAX {
                    return Ok(());
                }
                let remaining = allowed
                    .checked_sub(&amount)
                    .ok_or(LedgerError::InsufficientAllowance { token, spender })?;
                state.set_allowance(token, from, spender, remaining);
                Ok(())
            })
        };
        let result = spent.and_then(|()| self.transfer(token, from, to, amount));
        self.settle(checkpoint, result)
    }

    fn approve(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let mut state = self.state.lock();
        state.ensure_token(token)?;
        state.set_allowance(token, owner, spender, amount);
        trace!(%token, %owner, %spender, %amount, "approve");
        Ok(())
    }

    fn allowance(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
    ) -> Result<Amount, LedgerError> {
        let state = self.state.lock();
        state.ensure_token(token)?;
        Ok(state.allowance(token, owner, spender))
    }

    fn checkpoint(&self) -> Checkpoint {
        let mut state = self.state.lock();
        state.open_checkpoints += 1;
        Checkpoint::new(state.journal.len())
    }

    fn commit(&self, _checkpoint: Checkpoint) {
        let mut state = self.state.lock();
        state.open_checkpoints = state.open_checkpoints.saturating_sub(1);
        if state.open_checkpoints == 0 {
            state.journal.clear();
        }
    }

    fn revert(&self, checkpoint: Checkpoint) {
        let actions = {
            let mut state = self.state.lock();
            let mut actions = Vec::new();
            while state.journal.len() > checkpoint.position() {
                let Some(entry) = state.journal.pop() else {
                    break;
                };
                if let Some(action) = state.undo(entry) {
                    actions.push(action);
                }
            }
            state.open_checkpoints = state.open_checkpoints.saturating_sub(1);
            if state.open_checkpoints == 0 {
                state.journal.clear();
            }
            actions
        };
        for action in actions {
            action();
        }
    }

    fn on_revert(&self, action: RevertAction) {
        let mut state = self.state.lock();
        if state.open_checkpoints > 0 {
            state.journal.push(JournalEntry::Action(action));
        }
    }
}
