//! Opaque 32-byte identity shared by tokens, holders, pairs and routers.

use core::fmt;

use sha3::{Digest, Keccak256};

/// A chain-agnostic account identity.
///
/// Tokens, liquidity holders, pairs and the router are all addressed the
/// same way, so a swap recipient can be compared against the pair's own
/// token identities. Ordering is lexicographic over the raw bytes; that
/// total order is what canonicalizes a token couple.
///
/// # Examples
///
/// ```
/// use pairswap::domain::Address;
///
/// let usdc = Address::derive("USDC");
/// assert_eq!(usdc, Address::derive("USDC"));
/// assert_ne!(usdc, Address::zero());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Address([u8; 32]);

impl Address {
    /// Creates an `Address` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying 32-byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// The all-zero address. Used as the default minimum-liquidity lock.
    #[must_use]
    pub const fn zero() -> Self {
        Self([0u8; 32])
    }

    /// Returns `true` for the all-zero address.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Deterministic address from a human label (`keccak256(label)`).
    ///
    /// Handy for naming accounts in tests and bootstrap code.
    #[must_use]
    pub fn derive(label: &str) -> Self {
        Self::from_digest(&Keccak256::digest(label.as_bytes()))
    }

    /// Keccak-256 over a domain tag followed by each part, in order.
    #[must_use]
    pub fn hash_parts(domain: &[u8], parts: &[&Address]) -> Self {
        let mut hasher = Keccak256::new();
        hasher.update(domain);
        for part in parts {
            hasher.update(part.0);
        }
        Self::from_digest(&hasher.finalize())
    }

    fn from_digest(digest: &[u8]) -> Self {
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&digest[..32]);
        Self(bytes)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    // short form keeps log lines readable
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address(0x{}..)", hex::encode(&self.0[..4]))
    }
}
