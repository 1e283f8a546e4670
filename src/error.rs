//! Unified error types for the pairswap library.
//!
//! All fallible operations across the crate return [`AmmError`] as their
//! error type, ensuring a consistent error handling experience for consumers.
//! Failures reported by the external token ledger are carried inside
//! [`AmmError::Ledger`].

use thiserror::Error;

use crate::domain::Address;

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, AmmError>;

/// Every way an exchange operation can fail.
///
/// The variants fall into four groups:
///
/// | Group | Variants | Caller action |
/// |-------|----------|---------------|
/// | Validation | `IdenticalTokens`, `ZeroAddress`, `InvalidRecipient`, `InvalidPath`, `IndexOutOfRange`, `PairNotFound`, `InvalidConfiguration` | fix the request |
/// | Economic guard | `InsufficientAmount`, `InsufficientOutputAmount`, `InsufficientInputAmount`, `ExcessiveInputAmount`, `Expired` | retry with adjusted bounds |
/// | Invariant | `InvariantViolation`, `InsufficientLiquidity`, `InsufficientLiquidityMinted`, `InsufficientLiquidityBurned`, arithmetic errors | operation is rolled back |
/// | Concurrency | `Reentrancy` | not retryable in the same call stack |
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmmError {
    /// Both sides of a couple are the same token.
    #[error("identical tokens")]
    IdenticalTokens,

    /// The zero address was supplied where a real token is required.
    #[error("zero address")]
    ZeroAddress,

    /// A pair for the canonical couple already exists.
    #[error("pair already exists: {0}")]
    PairExists(Address),

    /// No pair is registered for the requested couple.
    #[error("pair not found")]
    PairNotFound,

    /// Index past the end of the registry's pair sequence.
    #[error("pair index {index} out of range (length {len})")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Current number of pairs.
        len: usize,
    },

    /// The swap path is malformed.
    #[error("invalid path: {0}")]
    InvalidPath(&'static str),

    /// Swap recipient is one of the pair's own tokens.
    #[error("invalid recipient")]
    InvalidRecipient,

    /// A computed deposit fell below the caller's minimum.
    #[error("insufficient amount: {0}")]
    InsufficientAmount(&'static str),

    /// Output is zero or below the caller's minimum.
    #[error("insufficient output amount")]
    InsufficientOutputAmount,

    /// A swap received no input tokens.
    #[error("insufficient input amount")]
    InsufficientInputAmount,

    /// Required input exceeds the caller's maximum.
    #[error("excessive input amount")]
    ExcessiveInputAmount,

    /// The operation's deadline has passed.
    #[error("expired: deadline {deadline}, now {now}")]
    Expired {
        /// Deadline supplied by the caller.
        deadline: u64,
        /// Clock reading at entry.
        now: u64,
    },

    /// Reserves cannot satisfy the request.
    #[error("insufficient liquidity")]
    InsufficientLiquidity,

    /// A deposit would mint zero shares.
    #[error("insufficient liquidity minted")]
    InsufficientLiquidityMinted,

    /// A redemption would return zero of some token.
    #[error("insufficient liquidity burned")]
    InsufficientLiquidityBurned,

    /// The fee-adjusted product check failed after a swap.
    #[error("constant-product invariant violated")]
    InvariantViolation,

    /// A guarded pair operation was entered while already locked.
    #[error("reentrant call rejected")]
    Reentrancy,

    /// An intermediate or final value does not fit its type.
    #[error("arithmetic overflow: {0}")]
    ArithmeticOverflow(&'static str),

    /// A subtraction would go below zero.
    #[error("underflow: {0}")]
    Underflow(&'static str),

    /// Division by zero in a pricing formula.
    #[error("division by zero")]
    DivisionByZero,

    /// Share spender has not been approved for the amount.
    #[error("insufficient share allowance")]
    InsufficientAllowance,

    /// Shares held by the lock address can never move.
    #[error("minimum liquidity is locked")]
    LockedLiquidity,

    /// Configuration parameters are invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// The token ledger refused a request.
    #[error("ledger: {0}")]
    Ledger(#[from] LedgerError),
}

/// Failures reported by a [`TokenLedger`](crate::traits::TokenLedger).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// The token is not known to the ledger.
    #[error("unknown token {0}")]
    UnknownToken(Address),

    /// Holder balance is smaller than the transfer amount.
    #[error("insufficient balance of {token} for {holder}")]
    InsufficientBalance {
        /// Token being moved.
        token: Address,
        /// Account being debited.
        holder: Address,
    },

    /// Spender allowance is smaller than the transfer amount.
    #[error("insufficient allowance of {token} for spender {spender}")]
    InsufficientAllowance {
        /// Token being moved.
        token: Address,
        /// Account spending on behalf of the owner.
        spender: Address,
    },

    /// Crediting the recipient would overflow its balance.
    #[error("balance overflow")]
    BalanceOverflow,

    /// A transfer hook rejected the transfer.
    #[error("transfer rejected: {0}")]
    Rejected(String),
}
