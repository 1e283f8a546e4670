//! The pair registry.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info};

use crate::config::PairConfig;
use crate::domain::{Address, TokenPair};
use crate::error::AmmError;
use crate::events::{Event, EventLog};
use crate::pair::Pair;
use crate::traits::{Clock, TokenLedger};

#[derive(Debug, Default)]
struct Directory {
    pair_of: HashMap<TokenPair, usize>,
    by_address: HashMap<Address, usize>,
    all_pairs: Vec<Arc<Pair>>,
}

/// Owns every pair and resolves token couples to them.
///
/// Every pair created here shares the registry's ledger, clock, event log
/// and [`PairConfig`].
///
/// # Thread Safety
///
/// The directory sits behind a `parking_lot::RwLock`; `create_pair` checks
/// and inserts under one write lock, so two threads racing on the same
/// couple cannot both succeed.
pub struct Registry {
    ledger: Arc<dyn TokenLedger>,
    clock: Arc<dyn Clock>,
    events: EventLog,
    config: PairConfig,
    directory: RwLock<Directory>,
}

impl Registry {
    /// Creates an empty registry with a fresh event log.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if `config` fails
    /// [`PairConfig::validate`].
    pub fn new(
        ledger: Arc<dyn TokenLedger>,
        clock: Arc<dyn Clock>,
        config: PairConfig,
    ) -> Result<Self, AmmError> {
        Self::with_events(ledger, clock, config, EventLog::new())
    }

    /// Like [`new`](Self::new), appending to an existing event log.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if `config` is invalid.
    pub fn with_events(
        ledger: Arc<dyn TokenLedger>,
        clock: Arc<dyn Clock>,
        config: PairConfig,
        events: EventLog,
    ) -> Result<Self, AmmError> {
        config.validate()?;
        Ok(Self {
            ledger,
            clock,
            events,
            config,
            directory: RwLock::new(Directory::default()),
        })
    }

    /// Registers a zero-reserve pair for the couple and returns its address.
    ///
    /// Argument order does not matter: the couple is canonicalized first.
    ///
    /// # Errors
    ///
    /// - [`AmmError::IdenticalTokens`] if `token_x == token_y`.
    /// - [`AmmError::ZeroAddress`] if either token is the zero address.
    /// - [`AmmError::PairExists`] if the couple already has a pair.
    pub fn create_pair(&self, token_x: Address, token_y: Address) -> Result<Address, AmmError> {
        let tokens = TokenPair::new(token_x, token_y)?;
        let (address, index) = {
            let mut dir = self.directory.write();
            if let Some(&existing) = dir.pair_of.get(&tokens) {
                let address = dir
                    .all_pairs
                    .get(existing)
                    .map_or_else(|| Pair::address_for(&tokens), |p| p.address());
                return Err(AmmError::PairExists(address));
            }
            let pair = Arc::new(Pair::new(
                tokens,
                self.config,
                Arc::clone(&self.ledger),
                Arc::clone(&self.clock),
                self.events.clone(),
            ));
            let address = pair.address();
            let index = dir.all_pairs.len();
            dir.pair_of.insert(tokens, index);
            dir.by_address.insert(address, index);
            dir.all_pairs.push(pair);
            (address, index)
        };
        self.events.emit(Event::PairCreated {
            token_a: tokens.first(),
            token_b: tokens.second(),
            pair: address,
            pair_index: index,
        });
        info!(token_a = %tokens.first(), token_b = %tokens.second(), pair = %address, index, "pair created");
        Ok(address)
    }

    /// Address of the couple's pair, in either argument order.
    #[must_use]
    pub fn get_pair(&self, token_x: Address, token_y: Address) -> Option<Address> {
        self.pair_for(token_x, token_y).map(|p| p.address())
    }

    /// Live handle of the couple's pair.
    #[must_use]
    pub fn pair_for(&self, token_x: Address, token_y: Address) -> Option<Arc<Pair>> {
        let tokens = TokenPair::new(token_x, token_y).ok()?;
        let dir = self.directory.read();
        dir.pair_of
            .get(&tokens)
            .and_then(|&i| dir.all_pairs.get(i))
            .cloned()
    }

    /// Live handle of the pair at `address`.
    #[must_use]
    pub fn pair(&self, address: Address) -> Option<Arc<Pair>> {
        let dir = self.directory.read();
        dir.by_address
            .get(&address)
            .and_then(|&i| dir.all_pairs.get(i))
            .cloned()
    }

    /// Number of pairs created so far.
    #[must_use]
    pub fn all_pairs_length(&self) -> usize {
        self.directory.read().all_pairs.len()
    }

    /// Address of the `index`-th pair in creation order.
    ///
    /// # Errors
    ///
    /// [`AmmError::IndexOutOfRange`] if `index >= all_pairs_length()`.
    pub fn pair_at(&self, index: usize) -> Result<Address, AmmError> {
        let dir = self.directory.read();
        dir.all_pairs
            .get(index)
            .map(|p| p.address())
            .ok_or(AmmError::IndexOutOfRange {
                index,
                len: dir.all_pairs.len(),
            })
    }

    /// The ledger every pair settles on.
    #[must_use]
    pub fn ledger(&self) -> &Arc<dyn TokenLedger> {
        &self.ledger
    }

    /// The clock every pair reads.
    #[must_use]
    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// The shared event log.
    #[must_use]
    pub const fn events(&self) -> &EventLog {
        &self.events
    }

    /// Configuration applied to every pair.
    #[must_use]
    pub const fn config(&self) -> &PairConfig {
        &self.config
    }

    /// Forgets pairs created after the first `len`.
    pub(crate) fn truncate(&self, len: usize) {
        let mut dir = self.directory.write();
        if dir.all_pairs.len() <= len {
            return;
        }
        let removed: Vec<Arc<Pair>> = dir.all_pairs.drain(len..).collect();
        for pair in &removed {
            dir.pair_of.remove(&pair.tokens());
            dir.by_address.remove(&pair.address());
        }
        debug!(removed = removed.len(), len, "pair registrations rolled back");
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("pairs", &self.all_pairs_length())
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::ledger::InMemoryLedger;

    fn registry() -> (Registry, Address, Address) {
        let ledger = Arc::new(InMemoryLedger::new());
        let x = ledger.deploy_token("Token0", "TK0");
        let y = ledger.deploy_token("Token1", "TK1");
        let Ok(registry) = Registry::new(
            ledger,
            Arc::new(ManualClock::new(0)),
            PairConfig::default(),
        ) else {
            panic!("valid config");
        };
        (registry, x, y)
    }

    #[test]
    fn create_pair_is_symmetric_and_exclusive() {
        let (registry, x, y) = registry();
        let Ok(pair) = registry.create_pair(x, y) else {
            panic!("first creation failed");
        };
        assert_eq!(registry.create_pair(y, x), Err(AmmError::PairExists(pair)));
        assert_eq!(registry.create_pair(x, y), Err(AmmError::PairExists(pair)));
        assert_eq!(registry.get_pair(x, y), Some(pair));
        assert_eq!(registry.get_pair(y, x), Some(pair));
        assert_eq!(registry.all_pairs_length(), 1);
    }

    #[test]
    fn create_pair_rejects_bad_tokens() {
        let (registry, x, _) = registry();
        assert_eq!(registry.create_pair(x, x), Err(AmmError::IdenticalTokens));
        assert_eq!(
            registry.create_pair(x, Address::zero()),
            Err(AmmError::ZeroAddress)
        );
        assert_eq!(registry.all_pairs_length(), 0);
        assert!(registry.events().is_empty());
    }

    #[test]
    fn pair_created_event_carries_canonical_order() {
        let (registry, x, y) = registry();
        let Ok(pair) = registry.create_pair(y, x) else {
            panic!("creation failed");
        };
        let (first, second) = crate::domain::sort_tokens(x, y);
        assert_eq!(
            registry.events().last(),
            Some(Event::PairCreated {
                token_a: first,
                token_b: second,
                pair,
                pair_index: 0,
            })
        );
        let Some(handle) = registry.pair(pair) else {
            panic!("pair resolvable by address");
        };
        assert_eq!(handle.token_a(), first);
        assert!(handle.get_reserves().is_empty());
    }

    #[test]
    fn pair_at_bounds() {
        let (registry, x, y) = registry();
        assert_eq!(
            registry.pair_at(0),
            Err(AmmError::IndexOutOfRange { index: 0, len: 0 })
        );
        let Ok(pair) = registry.create_pair(x, y) else {
            panic!("creation failed");
        };
        assert_eq!(registry.pair_at(0), Ok(pair));
        assert_eq!(
            registry.pair_at(1),
            Err(AmmError::IndexOutOfRange { index: 1, len: 1 })
        );
    }

    #[test]
    fn truncate_forgets_later_pairs() {
        let (registry, x, y) = registry();
        let z = Address::derive("z");
        let Ok(first) = registry.create_pair(x, y) else {
            panic!("creation failed");
        };
        let Ok(second) = registry.create_pair(x, z) else {
            panic!("creation failed");
        };
        registry.truncate(1);
        assert_eq!(registry.all_pairs_length(), 1);
        assert_eq!(registry.get_pair(x, y), Some(first));
        assert_eq!(registry.get_pair(x, z), None);
        assert!(registry.pair(second).is_none());
        let Ok(again) = registry.create_pair(z, x) else {
            panic!("couple is free again");
        };
        assert_eq!(again, second);
    }

    #[test]
    fn custom_minimum_is_accepted() {
        let ledger = Arc::new(InMemoryLedger::new());
        let Ok(config) = PairConfig::new(
            crate::domain::FeeTier::STANDARD,
            crate::domain::Shares::new(1),
            Address::zero(),
        ) else {
            panic!("minimum of one is valid");
        };
        assert!(Registry::new(ledger, Arc::new(ManualClock::new(0)), config).is_ok());
    }
}
