//! Router path policy.

use crate::domain::SwapPath;
use crate::error::AmmError;

/// Default upper bound on hops in a single routed swap.
pub const DEFAULT_MAX_HOPS: usize = 8;

/// Limits the router applies to swap paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouterConfig {
    allow_repeated_tokens: bool,
    max_hops: usize,
}

impl RouterConfig {
    /// Creates a validated router configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if `max_hops` is zero.
    pub fn new(allow_repeated_tokens: bool, max_hops: usize) -> Result<Self, AmmError> {
        let config = Self {
            allow_repeated_tokens,
            max_hops,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if `max_hops` is zero.
    pub fn validate(&self) -> Result<(), AmmError> {
        if self.max_hops == 0 {
            return Err(AmmError::InvalidConfiguration("max_hops must be positive"));
        }
        Ok(())
    }

    /// Whether a token may appear twice in one path.
    #[must_use]
    pub const fn allow_repeated_tokens(&self) -> bool {
        self.allow_repeated_tokens
    }

    /// Maximum pairs a single swap may traverse.
    #[must_use]
    pub const fn max_hops(&self) -> usize {
        self.max_hops
    }

    /// Checks `path` against this policy.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidPath`] if the path is too long or repeats
    /// a token while repetition is disabled.
    pub fn check_path(&self, path: &SwapPath) -> Result<(), AmmError> {
        if path.hop_count() > self.max_hops {
            return Err(AmmError::InvalidPath("too many hops"));
        }
        if !self.allow_repeated_tokens && path.has_repeated_tokens() {
            return Err(AmmError::InvalidPath("token repeated in path"));
        }
        Ok(())
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            allow_repeated_tokens: true,
            max_hops: DEFAULT_MAX_HOPS,
        }
    }
}
