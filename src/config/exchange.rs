//! Top-level exchange configuration.

use super::{PairConfig, RouterConfig};
use crate::error::AmmError;

/// Everything needed to stand up a registry and its router.
///
/// With the `serde` feature this can be loaded from any serde format:
///
/// ```text
/// { "pair":   { "fee_tier": 30, "minimum_liquidity": 1000, "lock_address": [0, ..] },
///   "router": { "allow_repeated_tokens": true, "max_hops": 8 } }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExchangeConfig {
    /// Applied to every pair.
    pub pair: PairConfig,
    /// Applied by the router.
    pub router: RouterConfig,
}

impl ExchangeConfig {
    /// Validates both halves.
    ///
    /// # Errors
    ///
    /// Returns the first [`AmmError::InvalidConfiguration`] found.
    pub fn validate(&self) -> Result<(), AmmError> {
        self.pair.validate()?;
        self.router.validate()
    }
}
