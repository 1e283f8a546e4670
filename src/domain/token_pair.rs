//! Canonical couple of distinct tokens.

use super::Address;
use crate::error::AmmError;

/// An unordered token couple stored in canonical order.
///
/// Construction sorts the two addresses so that `first() < second()`. The
/// registry keys pairs by this type, which makes `(X, Y)` and `(Y, X)`
/// resolve to the same entry without depending on insertion order.
///
/// # Examples
///
/// ```
/// use pairswap::domain::{Address, TokenPair};
///
/// let x = Address::from_bytes([1u8; 32]);
/// let y = Address::from_bytes([2u8; 32]);
///
/// let pair = TokenPair::new(y, x).expect("distinct tokens");
/// assert_eq!(pair.first(), x);
/// assert_eq!(pair, TokenPair::new(x, y).expect("distinct tokens"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TokenPair {
    token_a: Address,
    token_b: Address,
}

impl TokenPair {
    /// Creates a canonically ordered couple.
    ///
    /// # Errors
    ///
    /// - [`AmmError::IdenticalTokens`] if both addresses are equal.
    /// - [`AmmError::ZeroAddress`] if either address is zero.
    pub fn new(token1: Address, token2: Address) -> Result<Self, AmmError> {
        if token1 == token2 {
            return Err(AmmError::IdenticalTokens);
        }
        let (token_a, token_b) = sort_tokens(token1, token2);
        if token_a.is_zero() {
            return Err(AmmError::ZeroAddress);
        }
        Ok(Self { token_a, token_b })
    }

    /// The lower-ordered token.
    #[must_use]
    pub const fn first(&self) -> Address {
        self.token_a
    }

    /// The higher-ordered token.
    #[must_use]
    pub const fn second(&self) -> Address {
        self.token_b
    }

    /// Returns `true` if `token` is one side of the couple.
    #[must_use]
    pub fn contains(&self, token: &Address) -> bool {
        self.token_a == *token || self.token_b == *token
    }

    /// Returns `true` if `token` is the canonical first token.
    ///
    /// Callers use this to map caller-ordered amounts onto canonical
    /// `(a, b)` slots.
    #[must_use]
    pub fn is_first(&self, token: &Address) -> bool {
        self.token_a == *token
    }

    /// Returns the counterpart of `token`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::PairNotFound`] if `token` is not in the couple.
    pub fn other(&self, token: &Address) -> Result<Address, AmmError> {
        if *token == self.token_a {
            Ok(self.token_b)
        } else if *token == self.token_b {
            Ok(self.token_a)
        } else {
            Err(AmmError::PairNotFound)
        }
    }
}

/// Total order used to canonicalize a couple. Pure; never fails.
#[must_use]
pub fn sort_tokens(x: Address, y: Address) -> (Address, Address) {
    if x < y {
        (x, y)
    } else {
        (y, x)
    }
}
