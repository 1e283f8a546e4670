//! Parameters shared by every pair the registry creates.

use crate::domain::{Address, FeeTier, Shares};
use crate::error::AmmError;

/// Default number of shares permanently locked on a pair's first deposit.
pub const MINIMUM_LIQUIDITY: Shares = Shares::new(1_000);

/// Configuration applied to every pair of an exchange.
///
/// The fee is exchange-wide: pairs do not carry their own fee tiers.
///
/// # Validation
///
/// - The fee must be strictly below 100%.
/// - The minimum liquidity must be positive, otherwise the first depositor
///   could redeem the whole pair down to zero reserves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PairConfig {
    fee_tier: FeeTier,
    minimum_liquidity: Shares,
    lock_address: Address,
}

impl PairConfig {
    /// Creates a validated pair configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if a parameter is out of
    /// range.
    pub fn new(
        fee_tier: FeeTier,
        minimum_liquidity: Shares,
        lock_address: Address,
    ) -> Result<Self, AmmError> {
        let config = Self {
            fee_tier,
            minimum_liquidity,
            lock_address,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if a parameter is out of
    /// range.
    pub fn validate(&self) -> Result<(), AmmError> {
        if !self.fee_tier.basis_points().is_valid_fraction() {
            return Err(AmmError::InvalidConfiguration("fee must be below 100%"));
        }
        if self.minimum_liquidity.is_zero() {
            return Err(AmmError::InvalidConfiguration(
                "minimum liquidity must be positive",
            ));
        }
        Ok(())
    }

    /// Returns the swap fee.
    #[must_use]
    pub const fn fee_tier(&self) -> FeeTier {
        self.fee_tier
    }

    /// Returns the shares locked on a first deposit.
    #[must_use]
    pub const fn minimum_liquidity(&self) -> Shares {
        self.minimum_liquidity
    }

    /// Returns the holder credited with the locked shares.
    #[must_use]
    pub const fn lock_address(&self) -> Address {
        self.lock_address
    }
}

impl Default for PairConfig {
    fn default() -> Self {
        Self {
            fee_tier: FeeTier::STANDARD,
            minimum_liquidity: MINIMUM_LIQUIDITY,
            lock_address: Address::zero(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::BasisPoints;

    #[test]
    fn default_matches_classic_parameters() {
        let config = PairConfig::default();
        assert_eq!(config.fee_tier(), FeeTier::STANDARD);
        assert_eq!(config.minimum_liquidity(), Shares::new(1_000));
        assert!(config.lock_address().is_zero());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn full_fee_rejected() {
        let result = PairConfig::new(
            FeeTier::new(BasisPoints::FULL),
            MINIMUM_LIQUIDITY,
            Address::zero(),
        );
        let Err(AmmError::InvalidConfiguration(_)) = result else {
            panic!("expected InvalidConfiguration");
        };
    }

    #[test]
    fn zero_minimum_rejected() {
        let result = PairConfig::new(FeeTier::STANDARD, Shares::ZERO, Address::zero());
        assert!(result.is_err());
    }

    #[test]
    fn custom_values_round_trip() {
        let lock = Address::derive("lock");
        let Ok(config) = PairConfig::new(FeeTier::new(BasisPoints::new(5)), Shares::new(10), lock)
        else {
            panic!("expected valid config");
        };
        assert_eq!(config.fee_tier().charged(), 5);
        assert_eq!(config.minimum_liquidity(), Shares::new(10));
        assert_eq!(config.lock_address(), lock);
    }
}
