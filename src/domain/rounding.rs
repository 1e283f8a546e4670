//! Explicit rounding direction for integer division.

/// Direction in which a division result is rounded.
///
/// Every division in the exchange states its direction. Amounts paid out
/// round [`Down`](Self::Down); amounts the trader must pay in round
/// [`Up`](Self::Up). Either way the remainder stays with the pool.
///
/// ```
/// use pairswap::domain::Rounding;
///
/// assert!(Rounding::Up.is_up());
/// assert!(!Rounding::Down.is_up());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rounding {
    /// Toward positive infinity.
    Up,
    /// Toward zero.
    Down,
}

impl Rounding {
    /// Returns `true` if this is [`Rounding::Up`].
    #[must_use]
    pub const fn is_up(&self) -> bool {
        matches!(self, Self::Up)
    }
}
