//! Ordered token route for multi-hop swaps.

use core::fmt;

use super::Address;
use crate::error::AmmError;

/// A validated route `[t0, t1, .., tn]` through `n` pairs.
///
/// # Invariants
///
/// - At least two tokens (one hop).
/// - Consecutive tokens differ, so every hop names a real couple.
///
/// Whether a token may appear twice in non-adjacent positions is a router
/// policy, see [`RouterConfig`](crate::config::RouterConfig).
///
/// # Examples
///
/// ```
/// use pairswap::domain::{Address, SwapPath};
///
/// let (a, b, c) = (Address::derive("A"), Address::derive("B"), Address::derive("C"));
/// let path = SwapPath::new(vec![a, b, c]).expect("valid path");
/// assert_eq!(path.hop_count(), 2);
/// assert_eq!(path.reversed().first(), c);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwapPath(Vec<Address>);

impl SwapPath {
    /// Validates and wraps a token route.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidPath`] if fewer than two tokens are given.
    /// - [`AmmError::IdenticalTokens`] if two consecutive tokens are equal.
    pub fn new(tokens: Vec<Address>) -> Result<Self, AmmError> {
        if tokens.len() < 2 {
            return Err(AmmError::InvalidPath("path needs at least two tokens"));
        }
        if tokens.windows(2).any(|w| w[0] == w[1]) {
            return Err(AmmError::IdenticalTokens);
        }
        Ok(Self(tokens))
    }

    /// Tokens in route order.
    #[must_use]
    pub fn tokens(&self) -> &[Address] {
        &self.0
    }

    /// Number of pairs traversed.
    #[must_use]
    pub fn hop_count(&self) -> usize {
        self.0.len() - 1
    }

    /// Input token of the first hop.
    #[must_use]
    pub fn first(&self) -> Address {
        self.0[0]
    }

    /// Output token of the last hop.
    #[must_use]
    pub fn last(&self) -> Address {
        self.0[self.0.len() - 1]
    }

    /// `(token_in, token_out)` for each hop, first to last.
    pub fn hops(&self) -> impl DoubleEndedIterator<Item = (Address, Address)> + '_ {
        self.0.windows(2).map(|w| (w[0], w[1]))
    }

    /// `true` if any token occurs more than once anywhere in the route.
    #[must_use]
    pub fn has_repeated_tokens(&self) -> bool {
        let mut seen = self.0.clone();
        seen.sort_unstable();
        seen.windows(2).any(|w| w[0] == w[1])
    }

    /// The same route traversed backwards.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let mut tokens = self.0.clone();
        tokens.reverse();
        Self(tokens)
    }
}

impl fmt::Display for SwapPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{token:?}")?;
        }
        Ok(())
    }
}
